//! Audio cues
//!
//! The game only fires named cues and never waits on them. In the browser the
//! cues are procedurally generated with the Web Audio API - no external files needed!

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Menu music (loops)
    Intro,
    /// Player hit an enemy
    Death,
    /// Milestone score
    Ping,
    /// Player touched the floor
    Bounce,
    /// Session started
    Start,
    /// In-game music (loops)
    Background,
}

impl Cue {
    pub fn is_loop(self) -> bool {
        matches!(self, Cue::Intro | Cue::Background)
    }
}

/// Fire-and-forget audio collaborator
pub trait AudioSink {
    /// Trigger a cue. Looping cues keep playing until stopped.
    fn play(&mut self, cue: Cue);
    /// Stop a looping cue (no-op for one-shots)
    fn stop(&mut self, cue: Cue);
    fn set_muted(&mut self, muted: bool);
    /// Global volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Discards everything (native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: Cue) {}
    fn stop(&mut self, _cue: Cue) {}
    fn set_muted(&mut self, _muted: bool) {}
    fn set_volume(&mut self, _volume: f32) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Cue};

    /// Loop level relative to the master volume
    const LOOP_GAIN: f32 = 0.08;

    struct LoopVoice {
        cue: Cue,
        osc: OscillatorNode,
        lfo: OscillatorNode,
        gain: GainNode,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
        loops: Vec<LoopVoice>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.5,
                muted: false,
                loops: Vec::new(),
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        fn refresh_loop_gains(&self) {
            let Some(ctx) = &self.ctx else { return };
            let level = self.effective_volume() * LOOP_GAIN;
            for voice in &self.loops {
                voice
                    .gain
                    .gain()
                    .set_target_at_time(level, ctx.current_time(), 0.05)
                    .ok();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short pitched blip with an exponential tail
        fn blip(
            &self,
            ctx: &AudioContext,
            vol: f32,
            from_hz: f32,
            to_hz: f32,
            length: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from_hz, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to_hz, t + length)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Bounce - soft thump
        fn play_bounce(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.6, 180.0, 70.0, 0.1, OscillatorType::Sine);
        }

        /// Milestone - bright two-note ping
        fn play_ping(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.4, 880.0, 880.0, 0.12, OscillatorType::Triangle);
            let Some((osc, gain)) = self.create_osc(ctx, 1320.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time() + 0.08;
            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Session start - rising sweep
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.5, 220.0, 880.0, 0.3, OscillatorType::Square);
        }

        /// Death - falling sawtooth
        fn play_death(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.6, 440.0, 40.0, 0.7, OscillatorType::Sawtooth);
        }

        /// Start a pulsing drone that runs until stopped
        fn start_loop(&mut self, cue: Cue) {
            if self.loops.iter().any(|v| v.cue == cue) {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };
            let (base_hz, pulse_hz) = match cue {
                Cue::Intro => (110.0, 0.5),
                _ => (82.4, 2.0),
            };
            let Some((osc, gain)) = self.create_osc(&ctx, base_hz, OscillatorType::Triangle)
            else {
                return;
            };
            let Ok(lfo) = ctx.create_oscillator() else { return };
            lfo.frequency().set_value(pulse_hz);
            // LFO wobbles the pitch a few hertz around the base note
            let Ok(depth) = ctx.create_gain() else { return };
            depth.gain().set_value(3.0);
            if lfo.connect_with_audio_node(&depth).is_err()
                || depth.connect_with_audio_param(&osc.frequency()).is_err()
            {
                return;
            }

            gain.gain()
                .set_value(self.effective_volume() * LOOP_GAIN);
            osc.start().ok();
            lfo.start().ok();
            self.loops.push(LoopVoice {
                cue,
                osc,
                lfo,
                gain,
            });
        }

        fn stop_loop(&mut self, cue: Cue) {
            self.loops.retain(|voice| {
                if voice.cue != cue {
                    return true;
                }
                voice.osc.stop().ok();
                voice.lfo.stop().ok();
                false
            });
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, cue: Cue) {
            if cue.is_loop() {
                self.start_loop(cue);
                return;
            }

            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                Cue::Bounce => self.play_bounce(ctx, vol),
                Cue::Ping => self.play_ping(ctx, vol),
                Cue::Start => self.play_start(ctx, vol),
                Cue::Death => self.play_death(ctx, vol),
                Cue::Intro | Cue::Background => {}
            }
        }

        fn stop(&mut self, cue: Cue) {
            if cue.is_loop() {
                self.stop_loop(cue);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.refresh_loop_gains();
        }

        fn set_volume(&mut self, volume: f32) {
            self.master_volume = volume.clamp(0.0, 1.0);
            self.refresh_loop_gains();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_cues() {
        assert!(Cue::Intro.is_loop());
        assert!(Cue::Background.is_loop());
        assert!(!Cue::Bounce.is_loop());
        assert!(!Cue::Death.is_loop());
    }
}
