//! Bounce - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trajectory, collisions, session state)
//! - `renderer`: Draw-list construction and the 2D canvas backend
//! - `platform`: Frame scheduling and browser glue
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `game`: Session context tying simulation, rendering and collaborators together

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::BounceError;
pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed frame cadence in milliseconds (one simulation step per display frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum simulation steps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Timer fallback interval when no native refresh callback is available
    pub const FALLBACK_FRAME_MS: i32 = 1000 / 60;

    /// Default world dimensions
    pub const DEFAULT_WORLD_WIDTH: f32 = 600.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 400.0;
    /// Share of the viewport height used by the world on touch devices
    pub const TOUCH_WORLD_HEIGHT_RATIO: f32 = 0.75;

    /// Bounce trajectory: y = a*t^2 + c, with c derived from world height
    pub const TRAJECTORY_A: f32 = 0.1;
    pub const TRAJECTORY_C_RATIO: f32 = 0.3;
    /// Trajectory parameter advance per frame
    pub const TRAJECTORY_STEP: f32 = 2.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START_X_RATIO: f32 = 0.75;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 7.0;
    pub const UPPER_ENEMY_Y_RATIO: f32 = 0.45;
    pub const UPPER_ENEMY_SPEED: f32 = 2.5;
    /// Lower enemy rides just above the floor
    pub const LOWER_ENEMY_FLOOR_OFFSET: f32 = 14.0;
    pub const LOWER_ENEMY_SPEED: f32 = 2.0;
    /// Speed gained on every right-wall bounce
    pub const ENEMY_SPEEDUP: f32 = 0.3;

    /// Particle behavior
    pub const PARTICLE_DRAG: f32 = 0.98;
    pub const PARTICLE_FADE: f32 = 0.92;
    /// A non-fading particle starts fading when a uniform draw exceeds this
    pub const PARTICLE_FADE_THRESHOLD: f32 = 0.92;
    /// Particles and notifications below this alpha are removed
    pub const MIN_ALPHA: f32 = 0.05;

    /// Notification behavior
    pub const NOTIFICATION_RISE: f32 = 0.4;
    pub const NOTIFICATION_DECAY: f32 = 0.08;

    /// Every score divisible by this is a milestone
    pub const MILESTONE_INTERVAL: u64 = 10;

    /// HUD bar height
    pub const HUD_HEIGHT: f32 = 30.0;
}
