//! Draw-list construction
//!
//! Turns the session into an ordered list of 2D drawing commands, back to front.
//! Backends only have to replay the list.

use glam::Vec2;

use crate::consts::HUD_HEIGHT;
use crate::sim::state::{Ball, EntityRef, GameState, Notification, Particle, Rgba};

/// Soft glow around balls
pub const BALL_GLOW: f32 = 10.0;
pub const BALL_OUTLINE: Rgba = Rgba::rgba(255, 255, 255, 0.4);
pub const BALL_OUTLINE_WIDTH: f32 = 2.0;

/// Backdrop behind notification text
pub const NOTIFICATION_BACKDROP_ALPHA: f32 = 0.7;
pub const NOTIFICATION_RADIUS: f32 = 14.0;
pub const NOTIFICATION_FONT_PX: f32 = 12.0;

pub const HUD_BACKGROUND: Rgba = Rgba::rgba(0, 0, 0, 0.3);
pub const HUD_LABEL: &str = "Score:";
pub const HUD_FONT: &str = "bold 16px Verdana";
pub const HUD_LABEL_COLOR: Rgba = Rgba::rgb(255, 255, 255);
pub const HUD_SCORE_COLOR: Rgba = Rgba::rgb(0, 220, 220);
pub const HUD_TEXT_POS: Vec2 = Vec2::new(5.0, 18.0);
pub const HUD_SCORE_OFFSET: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned filled rectangle
    Rect { pos: Vec2, size: Vec2, color: Rgba },
    /// Filled circle, optionally glowing and outlined
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgba,
        glow: Option<f32>,
        outline: Option<(Rgba, f32)>,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: Rgba,
        align: TextAlign,
    },
}

/// A frame's worth of commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build the frame for the current state.
///
/// Order: background fade, player, enemies, particles, notifications, HUD.
/// Balls and HUD only while Playing; effects always.
pub fn build_frame(state: &GameState, trail_alpha: f32) -> Frame {
    let world = state.world;
    let mut commands = Vec::with_capacity(
        4 + state.enemies.len() + state.particles.len() + state.notifications.len() * 2,
    );

    commands.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(world.width, world.height),
        color: Rgba::rgba(0, 0, 0, trail_alpha),
    });

    let playing = state.is_playing();
    for entity in state.entities() {
        match entity {
            EntityRef::Ball(ball) if playing => commands.push(ball_command(ball)),
            EntityRef::Ball(_) => {}
            EntityRef::Particle(p) => commands.push(particle_command(p)),
            EntityRef::Notification(n) => commands.extend(notification_commands(n)),
        }
    }

    if playing {
        hud_commands(&mut commands, state.score, world.width);
    }

    Frame {
        width: world.width,
        height: world.height,
        commands,
    }
}

fn ball_command(ball: &Ball) -> DrawCommand {
    DrawCommand::Circle {
        center: ball.pos,
        radius: ball.radius,
        fill: ball.color,
        glow: Some(BALL_GLOW),
        outline: Some((BALL_OUTLINE, BALL_OUTLINE_WIDTH)),
    }
}

/// Square tinted by the particle color, scaled by its fade alpha
fn particle_command(p: &Particle) -> DrawCommand {
    DrawCommand::Rect {
        pos: p.pos,
        size: Vec2::splat(p.size),
        color: p.color.with_alpha(p.color.a * p.alpha),
    }
}

fn notification_commands(n: &Notification) -> [DrawCommand; 2] {
    let [r, g, b] = n.rgb;
    [
        DrawCommand::Circle {
            center: n.pos,
            radius: NOTIFICATION_RADIUS * n.scale,
            fill: Rgba::rgba(0, 0, 0, NOTIFICATION_BACKDROP_ALPHA * n.alpha),
            glow: None,
            outline: None,
        },
        DrawCommand::Text {
            text: n.text.clone(),
            pos: Vec2::new(n.pos.x, n.pos.y + 4.0 * n.scale),
            font: format!("bold {}px Arial", (NOTIFICATION_FONT_PX * n.scale).round()),
            color: Rgba::rgba(r, g, b, n.alpha),
            align: TextAlign::Center,
        },
    ]
}

fn hud_commands(commands: &mut Vec<DrawCommand>, score: u64, width: f32) {
    commands.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(width, HUD_HEIGHT),
        color: HUD_BACKGROUND,
    });
    commands.push(DrawCommand::Text {
        text: HUD_LABEL.to_string(),
        pos: HUD_TEXT_POS,
        font: HUD_FONT.to_string(),
        color: HUD_LABEL_COLOR,
        align: TextAlign::Left,
    });
    commands.push(DrawCommand::Text {
        text: score.to_string(),
        pos: HUD_TEXT_POS + Vec2::new(HUD_SCORE_OFFSET, 0.0),
        font: HUD_FONT.to_string(),
        color: HUD_SCORE_COLOR,
        align: TextAlign::Left,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::Sequence;
    use crate::sim::state::{MILESTONE_COLOR, PLAYER_COLOR, World};

    fn kinds(frame: &Frame) -> Vec<&'static str> {
        frame
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Rect { .. } => "rect",
                DrawCommand::Circle { .. } => "circle",
                DrawCommand::Text { .. } => "text",
            })
            .collect()
    }

    #[test]
    fn test_idle_frame_is_just_background() {
        let state = GameState::new(World::default(), 0);
        let frame = build_frame(&state, 1.0);
        assert_eq!(frame.len(), 1);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Rect {
                pos: Vec2::ZERO,
                size: Vec2::new(600.0, 400.0),
                color: Rgba::rgba(0, 0, 0, 1.0),
            }
        );
    }

    #[test]
    fn test_playing_frame_order() {
        let mut state = GameState::new(World::default(), 0);
        state.start();
        let mut rng = Sequence::constant(0.5);
        state.emit_particles(PLAYER_COLOR, Vec2::new(5.0, 5.0), 1.0, 3.0, 2, &mut rng);
        state.notify("10", Vec2::new(100.0, 100.0), 4.0, MILESTONE_COLOR);
        state.score = 42;

        let frame = build_frame(&state, 0.4);
        assert_eq!(
            kinds(&frame),
            vec![
                "rect", // background
                "circle", "circle", "circle", // player + enemies
                "rect", "rect", // particles
                "circle", "text", // notification
                "rect", "text", "text", // HUD
            ]
        );

        match &frame.commands[1] {
            DrawCommand::Circle {
                radius,
                glow,
                outline,
                ..
            } => {
                assert_eq!(*radius, 12.0);
                assert_eq!(*glow, Some(BALL_GLOW));
                assert_eq!(*outline, Some((BALL_OUTLINE, BALL_OUTLINE_WIDTH)));
            }
            other => panic!("expected player circle, got {:?}", other),
        }
        match frame.commands.last() {
            Some(DrawCommand::Text { text, .. }) => assert_eq!(text, "42"),
            other => panic!("expected score text, got {:?}", other),
        }
    }

    #[test]
    fn test_effects_survive_session_end() {
        let mut state = GameState::new(World::default(), 0);
        state.start();
        let mut rng = Sequence::constant(0.5);
        state.emit_particles(PLAYER_COLOR, Vec2::ZERO, 1.0, 6.0, 3, &mut rng);
        state.stop();

        let frame = build_frame(&state, 1.0);
        assert_eq!(kinds(&frame), vec!["rect", "rect", "rect", "rect"]);
    }

    #[test]
    fn test_notification_layout() {
        let mut state = GameState::new(World::default(), 0);
        state.notify("20", Vec2::new(50.0, 60.0), 4.0, MILESTONE_COLOR);
        state.notifications[0].alpha = 0.5;

        let frame = build_frame(&state, 1.0);
        assert_eq!(
            frame.commands[1],
            DrawCommand::Circle {
                center: Vec2::new(50.0, 60.0),
                radius: 56.0,
                fill: Rgba::rgba(0, 0, 0, 0.35),
                glow: None,
                outline: None,
            }
        );
        assert_eq!(
            frame.commands[2],
            DrawCommand::Text {
                text: "20".into(),
                pos: Vec2::new(50.0, 76.0),
                font: "bold 48px Arial".into(),
                color: Rgba::rgba(0, 220, 220, 0.5),
                align: TextAlign::Center,
            }
        );
    }

    #[test]
    fn test_particle_uses_its_alpha() {
        let mut state = GameState::new(World::default(), 0);
        let mut rng = Sequence::constant(0.5);
        state.emit_particles(PLAYER_COLOR, Vec2::new(3.0, 4.0), 1.0, 5.0, 1, &mut rng);
        state.particles[0].alpha = 0.25;
        let frame = build_frame(&state, 1.0);
        assert_eq!(
            frame.commands[1],
            DrawCommand::Rect {
                pos: Vec2::new(3.0, 4.0),
                size: Vec2::splat(5.0),
                color: PLAYER_COLOR.with_alpha(0.9 * 0.25),
            }
        );
    }
}
