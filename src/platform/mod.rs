//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Device layout (touch vs desktop world sizing)

pub mod scheduler;

pub use scheduler::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use scheduler::request_frame;

use crate::sim::World;

/// Pick the world size. Touch devices fill the viewport; everything else uses the fixed default.
pub fn world_for(touch_device: bool, viewport_width: f32, viewport_height: f32) -> World {
    if touch_device {
        World::for_viewport(viewport_width, viewport_height)
    } else {
        World::default()
    }
}

/// Whether the browser reports a touch screen
#[cfg(target_arch = "wasm32")]
pub fn is_touch_device() -> bool {
    web_sys::window()
        .map(|w| w.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

/// Current viewport size in CSS pixels
#[cfg(target_arch = "wasm32")]
pub fn viewport_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(window.inner_width()), read(window.inner_height()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_for_layout() {
        assert_eq!(world_for(false, 1920.0, 1080.0), World::default());
        assert_eq!(world_for(true, 400.0, 800.0), World::new(400.0, 600.0));
    }
}
