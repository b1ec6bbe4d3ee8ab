//! Per-frame simulation step
//!
//! One call advances the whole session by one display frame. Gameplay entities
//! only move while Playing; particles and notifications keep animating either
//! way so the death burst plays out over the menu.

use glam::Vec2;

use super::collision::within_horizontal_bounds;
use super::rng::RandomSource;
use super::state::{
    BallKind, Body, GameEvent, GameState, Heading, MILESTONE_COLOR, Notification, Particle, Rgba,
};
use crate::consts::*;

/// Particle emission parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub speed: f32,
    pub size: f32,
    pub quantity: usize,
}

/// Player touches the floor
pub const BOUNCE_BURST: Burst = Burst {
    speed: 3.0,
    size: 3.0,
    quantity: 15,
};

/// Enemy turns at a wall
pub const WALL_BURST: Burst = Burst {
    speed: 3.0,
    size: 3.0,
    quantity: 15,
};

/// Player death
pub const PLAYER_DEATH_BURST: Burst = Burst {
    speed: 3.0,
    size: 6.0,
    quantity: 60,
};

/// Enemy death; flies out at the enemy's own speed
pub const ENEMY_DEATH_SIZE: f32 = 3.0;
pub const ENEMY_DEATH_QUANTITY: usize = 30;

/// Milestone shower; quantity equals the score reached
pub const MILESTONE_SPEED: f32 = 10.0;
pub const MILESTONE_SIZE: f32 = 5.0;
pub const MILESTONE_PARTICLE_OFFSET: f32 = 80.0;
pub const MILESTONE_TEXT_OFFSET: f32 = 70.0;
pub const MILESTONE_TEXT_SCALE: f32 = 4.0;

/// Advance the session by one frame
pub fn tick(state: &mut GameState, rng: &mut dyn RandomSource) {
    if state.is_playing() {
        update_player(state, rng);
        update_enemies(state, rng);
        check_collisions(state, rng);
    }
    update_particles(&mut state.particles, rng);
    update_notifications(&mut state.notifications);
}

fn update_player(state: &mut GameState, rng: &mut dyn RandomSource) {
    let Some(player) = state.player.as_ref() else {
        return;
    };

    // Below the floor line: turn around and score
    if player.pos.y > state.world.height - player.radius {
        state.bounce.flip();
        score_bounce(state, rng);
    }
    let y = state.bounce.advance();

    let width = state.world.width;
    let Some(player) = state.player.as_mut() else {
        return;
    };
    player.pos.y = y;

    let previous_x = player.pos.x;
    if let BallKind::Player {
        moving_left,
        moving_right,
    } = player.kind
    {
        if moving_left {
            player.pos.x -= player.speed;
        }
        if moving_right {
            player.pos.x += player.speed;
        }
    }
    // Reject, don't clamp
    if !within_horizontal_bounds(player.pos.x, player.radius, width) {
        player.pos.x = previous_x;
    }
}

fn score_bounce(state: &mut GameState, rng: &mut dyn RandomSource) {
    state.score += 1;
    let score = state.score;
    state.events.push(GameEvent::Bounce { score });

    let Some((color, pos)) = state.player.as_ref().map(|p| (p.color, p.pos)) else {
        return;
    };
    emit(state, color, pos, BOUNCE_BURST, rng);

    if score % MILESTONE_INTERVAL == 0 {
        state.notify(
            score.to_string(),
            pos - Vec2::new(0.0, MILESTONE_TEXT_OFFSET),
            MILESTONE_TEXT_SCALE,
            MILESTONE_COLOR,
        );
        let shower = Burst {
            speed: MILESTONE_SPEED,
            size: MILESTONE_SIZE,
            quantity: score as usize,
        };
        emit(state, color, pos - Vec2::new(0.0, MILESTONE_PARTICLE_OFFSET), shower, rng);
        state.events.push(GameEvent::Milestone { score });
        log::debug!("Milestone reached: {}", score);
    }
}

fn update_enemies(state: &mut GameState, rng: &mut dyn RandomSource) {
    let width = state.world.width;
    let mut turned = Vec::new();

    for enemy in state.enemies.iter_mut().rev() {
        let BallKind::Enemy { heading } = &mut enemy.kind else {
            continue;
        };
        enemy.pos.x += enemy.speed * heading.sign();

        if enemy.pos.x > width - enemy.radius {
            *heading = Heading::Left;
            enemy.speed += ENEMY_SPEEDUP;
            turned.push((enemy.color, enemy.pos));
        } else if enemy.pos.x < enemy.radius {
            *heading = Heading::Right;
            turned.push((enemy.color, enemy.pos));
        }
    }

    for (color, pos) in turned {
        emit(state, color, pos, WALL_BURST, rng);
        state.events.push(GameEvent::EnemyBounce);
    }
}

/// First hit (newest enemy first) ends the session; the rest are skipped
fn check_collisions(state: &mut GameState, rng: &mut dyn RandomSource) {
    let Some(player) = state.player.as_ref() else {
        return;
    };
    let Some(index) = state.enemies.iter().rposition(|enemy| player.intersects(enemy)) else {
        return;
    };
    let (player_color, player_pos) = (player.color, player.pos);

    let enemy = state.enemies.remove(index);
    emit(state, player_color, player_pos, PLAYER_DEATH_BURST, rng);
    let enemy_burst = Burst {
        speed: enemy.speed,
        size: ENEMY_DEATH_SIZE,
        quantity: ENEMY_DEATH_QUANTITY,
    };
    emit(state, enemy.color, enemy.pos, enemy_burst, rng);

    state.stop();
    state.events.push(GameEvent::Collision);
}

fn emit(
    state: &mut GameState,
    color: Rgba,
    pos: Vec2,
    burst: Burst,
    rng: &mut dyn RandomSource,
) {
    state.emit_particles(color, pos, burst.speed, burst.size, burst.quantity, rng);
}

/// Drift, drag and fade particles; drop the faded ones
pub fn update_particles(particles: &mut Vec<Particle>, rng: &mut dyn RandomSource) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel *= PARTICLE_DRAG;
        if particle.fading {
            particle.alpha *= PARTICLE_FADE;
        } else if rng.next_unit() > PARTICLE_FADE_THRESHOLD {
            particle.fading = true;
        }
    }
    particles.retain(Particle::is_alive);
}

/// Per-frame alpha multiplier for a notification. Slow while opaque, faster as it fades.
#[inline]
pub fn notification_decay(alpha: f32) -> f32 {
    1.0 - (NOTIFICATION_DECAY * (1.0 - (alpha - NOTIFICATION_DECAY)))
}

/// Float notifications upward and fade them out
pub fn update_notifications(notifications: &mut Vec<Notification>) {
    for note in notifications.iter_mut() {
        note.pos.y -= NOTIFICATION_RISE;
        note.alpha *= notification_decay(note.alpha);
    }
    notifications.retain(Notification::is_alive);
}
