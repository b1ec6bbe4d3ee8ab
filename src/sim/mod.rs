//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Injected randomness only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::{circles_intersect, within_horizontal_bounds};
pub use rng::{RandomSource, Sequence, seeded};
pub use state::{
    Ball, BallKind, Body, EntityRef, GameEvent, GamePhase, GameState, Heading, Notification,
    Particle, Rgba, World,
};
pub use tick::{Burst, tick, update_notifications, update_particles};
pub use trajectory::{Bounce, Quadratic, bounce_curve};
