//! Game context
//!
//! Owns the session state together with everything the frame loop needs:
//! the RNG, frame clock, settings, highscore and the injected storage and
//! audio collaborators. Platform code feeds it input and timestamps and draws
//! the frames it returns.

use rand_pcg::Pcg32;

use crate::audio::{AudioSink, Cue};
use crate::highscores::HighScore;
use crate::input::InputEvent;
use crate::persistence::Storage;
use crate::platform::FrameClock;
use crate::renderer::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, World, seeded, tick};

pub struct Game<S: Storage, A: AudioSink> {
    pub state: GameState,
    pub settings: Settings,
    high_score: HighScore,
    storage: S,
    audio: A,
    rng: Pcg32,
    clock: FrameClock,
    /// Events already handled here, kept for the presentation layer
    outbox: Vec<GameEvent>,
}

impl<S: Storage, A: AudioSink> Game<S, A> {
    /// `clock_seed` is used unless the settings pin a seed
    pub fn new(world: World, mut storage: S, mut audio: A, clock_seed: u64) -> Self {
        let settings = Settings::load(&storage);
        let high_score = HighScore::load(&mut storage);
        let seed = settings.seed.unwrap_or(clock_seed);

        audio.set_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        audio.play(Cue::Intro);

        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(world, high_score.best),
            settings,
            high_score,
            storage,
            audio,
            rng: seeded(seed),
            clock: FrameClock::new(),
            outbox: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Begin a session. False if one is already running.
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        self.dispatch_events();
        started
    }

    /// End the running session from outside the simulation
    pub fn stop(&mut self) {
        self.state.stop();
        self.dispatch_events();
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.state.handle_input(event);
        self.dispatch_events();
    }

    /// Advance exactly one simulation step
    pub fn step(&mut self) {
        tick(&mut self.state, &mut self.rng);
        self.dispatch_events();
    }

    /// Simulate whatever steps are due at `now_ms` and build the frame to show
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            self.step();
        }
        self.scene()
    }

    pub fn scene(&self) -> Frame {
        build_frame(&self.state, self.settings.trail_alpha)
    }

    /// Flip global mute, persisting the choice. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.audio.set_muted(self.settings.muted);
        self.settings.save(&mut self.storage);
        self.settings.muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.audio.set_volume(self.settings.master_volume);
        self.settings.save(&mut self.storage);
    }

    /// Events handled since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SessionStarted => {
                    self.audio.stop(Cue::Intro);
                    self.audio.play(Cue::Start);
                    self.audio.play(Cue::Background);
                }
                GameEvent::Bounce { .. } => self.audio.play(Cue::Bounce),
                GameEvent::Milestone { .. } => self.audio.play(Cue::Ping),
                GameEvent::Collision => self.audio.play(Cue::Death),
                GameEvent::EnemyBounce => {}
                GameEvent::SessionEnded { score, .. } => {
                    self.audio.stop(Cue::Background);
                    self.audio.play(Cue::Intro);
                    self.high_score.record(score, &mut self.storage);
                }
            }
            self.outbox.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::input::Key;
    use crate::persistence::MemoryStorage;

    fn game() -> Game<MemoryStorage, SilentAudio> {
        Game::new(World::default(), MemoryStorage::new(), SilentAudio, 1)
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = game();
        assert!(!game.is_playing());
        assert_eq!(game.high_score(), 0);
        assert_eq!(
            game.storage().get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_confirm_starts_session() {
        let mut game = game();
        game.handle_input(InputEvent::KeyUp(Key::Confirm));
        assert!(game.is_playing());
        assert_eq!(game.take_events(), vec![GameEvent::SessionStarted]);
        assert!(!game.start());
    }

    #[test]
    fn test_frame_steps_by_clock() {
        let mut game = game();
        game.start();
        game.frame(0.0);
        assert_eq!(game.state.bounce.t, 2.0);
        // Same timestamp again: nothing due
        game.frame(0.0);
        assert_eq!(game.state.bounce.t, 2.0);
        game.frame(1000.0 / 60.0 + 0.5);
        assert_eq!(game.state.bounce.t, 4.0);
    }

    #[test]
    fn test_external_stop_records_high_score() {
        let mut game = game();
        game.start();
        game.state.score = 17;
        game.stop();
        assert_eq!(game.high_score(), 17);
        assert_eq!(
            game.storage().get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("17")
        );
    }

    #[test]
    fn test_toggle_mute_persists() {
        let mut game = game();
        assert!(game.toggle_mute());
        let settings = Settings::load(game.storage());
        assert!(settings.muted);
        assert!(!game.toggle_mute());
    }
}
