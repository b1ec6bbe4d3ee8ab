//! Frame scheduling
//!
//! The simulation runs one fixed step per display frame at 60 Hz. `FrameClock`
//! turns wall-clock timestamps into a number of steps so faster or slower
//! displays keep the same game speed; `request_frame` asks the browser for the
//! next refresh, falling back to a plain timer.

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};

/// Longest gap we will try to catch up on (tab switches, debugger pauses)
const MAX_ELAPSED_MS: f64 = 100.0;
/// A step is due this fraction of a step early, so refresh jitter around the
/// step boundary cannot alternate 0 and 2 steps
const STEP_TOLERANCE: f64 = 0.25;

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    max_substeps: u32,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_step(FRAME_MS, MAX_SUBSTEPS)
    }

    pub fn with_step(step_ms: f64, max_substeps: u32) -> Self {
        Self {
            step_ms,
            max_substeps,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Steps to simulate for a frame presented at `now_ms`. The first frame always runs one.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 1;
        };
        self.accumulator += (now_ms - last).clamp(0.0, MAX_ELAPSED_MS);

        // Early steps leave a negative remainder that the next frame pays back
        let due = self.step_ms * (1.0 - STEP_TOLERANCE);
        let mut steps = 0;
        while self.accumulator >= due && steps < self.max_substeps {
            self.accumulator -= self.step_ms;
            steps += 1;
        }
        // Drop any backlog we could not work off this frame
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step_ms);
        }
        steps
    }

    /// Forget timing history (e.g. after the loop was suspended)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

/// Run `callback` on the next display refresh, or after ~16 ms if the
/// browser offers no refresh callback.
#[cfg(target_arch = "wasm32")]
pub fn request_frame<F>(callback: F)
where
    F: FnOnce(f64) + 'static,
{
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let Some(window) = web_sys::window() else {
        log::error!("No window - frame loop stopped");
        return;
    };
    let has_raf = js_sys::Reflect::has(&window, &JsValue::from_str("requestAnimationFrame"))
        .unwrap_or(false);

    if has_raf {
        let closure = Closure::once(move |time: f64| callback(time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        let closure = Closure::once(move || callback(js_sys::Date::now()));
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            crate::consts::FALLBACK_FRAME_MS,
        );
        closure.forget();
    }
}
