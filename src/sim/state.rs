//! Game state and core simulation types
//!
//! Entities are a closed set: balls (player or enemy), particles and floating
//! notifications. The session owns all of them and runs the Idle/Playing cycle.

use glam::Vec2;

use super::rng::RandomSource;
use super::trajectory::{Bounce, Quadratic, bounce_curve};
use crate::consts::*;
use crate::input::{InputEvent, Key, TouchZone};

/// Straight RGBA color (alpha in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(0, 220, 220, 0.5)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const PLAYER_COLOR: Rgba = Rgba::rgba(255, 255, 255, 0.9);
pub const UPPER_ENEMY_COLOR: Rgba = Rgba::rgba(220, 220, 0, 0.9);
pub const LOWER_ENEMY_COLOR: Rgba = Rgba::rgba(0, 220, 0, 0.9);
pub const MILESTONE_COLOR: [u8; 3] = [0, 220, 220];

/// Capability shared by every entity
pub trait Body {
    fn position(&self) -> Vec2;
    fn is_alive(&self) -> bool;
}

/// Enemy patrol heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// What drives a ball horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    /// Steered by held movement keys
    Player { moving_left: bool, moving_right: bool },
    /// Patrols between the side walls
    Enemy { heading: Heading },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Rgba,
    pub kind: BallKind,
}

impl Ball {
    pub fn player(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            color: PLAYER_COLOR,
            kind: BallKind::Player {
                moving_left: false,
                moving_right: false,
            },
        }
    }

    /// New enemies start out heading left
    pub fn enemy(pos: Vec2, speed: f32, color: Rgba) -> Self {
        Self {
            pos,
            radius: ENEMY_RADIUS,
            speed,
            color,
            kind: BallKind::Enemy {
                heading: Heading::Left,
            },
        }
    }

    pub fn intersects(&self, other: &Ball) -> bool {
        super::collision::circles_intersect(self.pos, self.radius, other.pos, other.radius)
    }

    /// Set a player's movement intent; no-op on enemies
    pub fn set_moving(&mut self, heading: Heading, held: bool) {
        if let BallKind::Player {
            moving_left,
            moving_right,
        } = &mut self.kind
        {
            match heading {
                Heading::Left => *moving_left = held,
                Heading::Right => *moving_right = held,
            }
        }
    }
}

impl Body for Ball {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_alive(&self) -> bool {
        true
    }
}

/// A square spark that drifts, slows and eventually fades out
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    pub size: f32,
    pub alpha: f32,
    pub fading: bool,
}

impl Particle {
    /// Random velocity with each axis in `[-speed, speed)`
    pub fn new(
        pos: Vec2,
        speed: f32,
        color: Rgba,
        size: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let vx = rng.spread(speed);
        let vy = rng.spread(speed);
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            color,
            size,
            alpha: 1.0,
            fading: false,
        }
    }
}

impl Body for Particle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_alive(&self) -> bool {
        self.alpha >= MIN_ALPHA
    }
}

/// Floating text badge
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub pos: Vec2,
    pub scale: f32,
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Body for Notification {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_alive(&self) -> bool {
        self.alpha >= MIN_ALPHA
    }
}

/// Borrowed view over any entity, in draw order
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Ball(&'a Ball),
    Particle(&'a Particle),
    Notification(&'a Notification),
}

impl Body for EntityRef<'_> {
    fn position(&self) -> Vec2 {
        match self {
            EntityRef::Ball(b) => b.position(),
            EntityRef::Particle(p) => p.position(),
            EntityRef::Notification(n) => n.position(),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            EntityRef::Ball(b) => b.is_alive(),
            EntityRef::Particle(p) => p.is_alive(),
            EntityRef::Notification(n) => n.is_alive(),
        }
    }
}

/// Playfield dimensions, fixed for the life of the process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Touch layout: full viewport width, most of its height (room for buttons below)
    pub fn for_viewport(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            width: viewport_width,
            height: viewport_height * TOUCH_WORLD_HEIGHT_RATIO,
        }
    }

    pub fn curve(&self) -> Quadratic {
        bounce_curve(self.height)
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu shown, nothing simulated
    Idle,
    /// Active gameplay
    Playing,
}

/// Things that happened during a step, for audio and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    /// Player touched the floor and scored
    Bounce { score: u64 },
    /// Score reached a multiple of ten
    Milestone { score: u64 },
    /// An enemy turned around at a wall
    EnemyBounce,
    /// Player hit an enemy
    Collision,
    SessionEnded {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score seen, seeded from storage
    pub high_score: u64,
    pub player: Option<Ball>,
    /// Active enemies in insertion order
    pub enemies: Vec<Ball>,
    pub particles: Vec<Particle>,
    pub notifications: Vec<Notification>,
    pub bounce: Bounce,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle session with empty collections
    pub fn new(world: World, high_score: u64) -> Self {
        Self {
            world,
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            player: None,
            enemies: Vec::new(),
            particles: Vec::new(),
            notifications: Vec::new(),
            bounce: Bounce::new(world.curve()),
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Drop every entity and rewind the trajectory
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.player = None;
        self.enemies.clear();
        self.particles.clear();
        self.notifications.clear();
        self.bounce.reset();
    }

    /// Idle -> Playing. Returns false if a session is already running.
    pub fn start(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.reset();

        let w = self.world;
        self.player = Some(Ball::player(Vec2::new(w.width * PLAYER_START_X_RATIO, 0.0)));
        self.enemies.push(Ball::enemy(
            Vec2::new(0.0, w.height * UPPER_ENEMY_Y_RATIO),
            UPPER_ENEMY_SPEED,
            UPPER_ENEMY_COLOR,
        ));
        self.enemies.push(Ball::enemy(
            Vec2::new(0.0, w.height - LOWER_ENEMY_FLOOR_OFFSET),
            LOWER_ENEMY_SPEED,
            LOWER_ENEMY_COLOR,
        ));

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session started ({}x{})", w.width, w.height);
        true
    }

    /// Playing -> Idle. Freezes the score and folds it into the highscore.
    /// Entities stay in place until the next start.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.phase = GamePhase::Idle;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.events.push(GameEvent::SessionEnded {
            score: self.score,
            high_score: self.high_score,
            new_high_score,
        });
        log::info!(
            "Session ended: score {} (best {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
    }

    /// Apply an input event. Only touches movement flags, or starts a session from Idle.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyUp(Key::Confirm) | InputEvent::TouchStart(TouchZone::Generic) => {
                if !self.is_playing() {
                    self.start();
                }
            }
            InputEvent::KeyDown(Key::Left) | InputEvent::TouchStart(TouchZone::Left) => {
                self.steer(Heading::Left, true)
            }
            InputEvent::KeyDown(Key::Right) | InputEvent::TouchStart(TouchZone::Right) => {
                self.steer(Heading::Right, true)
            }
            InputEvent::KeyUp(Key::Left) | InputEvent::TouchEnd(TouchZone::Left) => {
                self.steer(Heading::Left, false)
            }
            InputEvent::KeyUp(Key::Right) | InputEvent::TouchEnd(TouchZone::Right) => {
                self.steer(Heading::Right, false)
            }
            InputEvent::KeyDown(Key::Confirm) | InputEvent::TouchEnd(TouchZone::Generic) => {}
        }
    }

    fn steer(&mut self, heading: Heading, held: bool) {
        if !self.is_playing() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.set_moving(heading, held);
        }
    }

    /// Spawn `quantity` particles at `pos`
    pub fn emit_particles(
        &mut self,
        color: Rgba,
        pos: Vec2,
        speed: f32,
        size: f32,
        quantity: usize,
        rng: &mut dyn RandomSource,
    ) {
        self.particles.reserve(quantity);
        for _ in 0..quantity {
            self.particles.push(Particle::new(pos, speed, color, size, rng));
        }
    }

    /// Push a floating notification
    pub fn notify(&mut self, text: impl Into<String>, pos: Vec2, scale: f32, rgb: [u8; 3]) {
        self.notifications.push(Notification {
            text: text.into(),
            pos,
            scale,
            rgb,
            alpha: 1.0,
        });
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// All entities back to front: player, enemies, particles, notifications
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.player
            .iter()
            .map(EntityRef::Ball)
            .chain(self.enemies.iter().map(EntityRef::Ball))
            .chain(self.particles.iter().map(EntityRef::Particle))
            .chain(self.notifications.iter().map(EntityRef::Notification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::Sequence;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new(World::default(), 7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.player.is_none());
        assert!(state.enemies.is_empty());
        assert_eq!(state.high_score, 7);
        assert_eq!(state.entities().count(), 0);
    }

    #[test]
    fn test_start_populates_session() {
        let mut state = GameState::new(World::default(), 0);
        assert!(state.start());
        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.particles.is_empty());
        assert!(state.notifications.is_empty());

        let player = state.player.as_ref().unwrap();
        assert_eq!(player.pos, Vec2::new(450.0, 0.0));
        assert_eq!(player.radius, 12.0);

        assert_eq!(state.enemies[0].pos, Vec2::new(0.0, 180.0));
        assert_eq!(state.enemies[0].speed, 2.5);
        assert_eq!(state.enemies[1].pos, Vec2::new(0.0, 386.0));
        assert_eq!(state.enemies[1].speed, 2.0);
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut state = GameState::new(World::default(), 0);
        state.start();
        state.score = 5;
        assert!(!state.start());
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_stop_updates_high_score_only_when_beaten() {
        let mut state = GameState::new(World::default(), 10);
        state.start();
        state.score = 4;
        state.stop();
        assert_eq!(state.high_score, 10);
        assert!(state.drain_events().contains(&GameEvent::SessionEnded {
            score: 4,
            high_score: 10,
            new_high_score: false,
        }));

        state.start();
        state.score = 12;
        state.stop();
        assert_eq!(state.high_score, 12);
        // Entities survive the stop
        assert!(state.player.is_some());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_restart_clears_effects() {
        let mut state = GameState::new(World::default(), 0);
        state.start();
        let mut rng = Sequence::constant(0.5);
        state.emit_particles(PLAYER_COLOR, Vec2::ZERO, 3.0, 3.0, 5, &mut rng);
        state.notify("10", Vec2::ZERO, 4.0, MILESTONE_COLOR);
        state.stop();
        assert_eq!(state.particles.len(), 5);

        state.start();
        assert!(state.particles.is_empty());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_input_sets_flags_only_while_playing() {
        let mut state = GameState::new(World::default(), 0);
        state.handle_input(InputEvent::KeyDown(Key::Left));
        assert!(state.player.is_none());

        state.handle_input(InputEvent::KeyUp(Key::Confirm));
        assert!(state.is_playing());

        state.handle_input(InputEvent::KeyDown(Key::Left));
        state.handle_input(InputEvent::TouchStart(TouchZone::Right));
        assert_eq!(
            state.player.as_ref().unwrap().kind,
            BallKind::Player {
                moving_left: true,
                moving_right: true
            }
        );

        state.handle_input(InputEvent::KeyUp(Key::Left));
        state.handle_input(InputEvent::TouchEnd(TouchZone::Right));
        assert_eq!(
            state.player.as_ref().unwrap().kind,
            BallKind::Player {
                moving_left: false,
                moving_right: false
            }
        );
    }

    #[test]
    fn test_generic_touch_starts_from_idle() {
        let mut state = GameState::new(World::default(), 0);
        state.handle_input(InputEvent::TouchStart(TouchZone::Generic));
        assert!(state.is_playing());
    }

    #[test]
    fn test_particle_velocity_spread() {
        let mut rng = Sequence::new(vec![0.0, 1.0]);
        let p = Particle::new(Vec2::ZERO, 3.0, PLAYER_COLOR, 3.0, &mut rng);
        assert_eq!(p.vel, Vec2::new(-3.0, 3.0));
        assert_eq!(p.alpha, 1.0);
        assert!(!p.fading);
        assert!(p.is_alive());
    }

    #[test]
    fn test_viewport_world() {
        let world = World::for_viewport(360.0, 640.0);
        assert_eq!(world.width, 360.0);
        assert_eq!(world.height, 480.0);
        assert!((world.curve().c - 144.0).abs() < 1e-4);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(UPPER_ENEMY_COLOR.to_css(), "rgba(220, 220, 0, 0.9)");
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(0.3).a, 0.3);
    }
}
