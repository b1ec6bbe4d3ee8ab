//! 2D canvas backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{DrawCommand, Frame, TextAlign};
use crate::error::BounceError;

/// Replays frames onto a canvas element
pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Fails if the browser cannot hand out a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, BounceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| BounceError::UnsupportedSurface(format!("{:?}", e)))?
            .ok_or_else(|| BounceError::UnsupportedSurface("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BounceError::UnsupportedSurface("unexpected context type".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn draw(&self, frame: &Frame) {
        for command in &frame.commands {
            self.ctx.save();
            self.draw_command(command);
            self.ctx.restore();
        }
    }

    fn draw_command(&self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Rect { pos, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                glow,
                outline,
            } => {
                ctx.begin_path();
                if ctx
                    .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .is_err()
                {
                    return;
                }
                let fill_css = fill.to_css();
                if let Some(blur) = glow {
                    ctx.set_shadow_blur(*blur as f64);
                    ctx.set_shadow_color(&fill_css);
                }
                if let Some((stroke, width)) = outline {
                    ctx.set_line_width(*width as f64);
                    ctx.set_stroke_style_str(&stroke.to_css());
                    ctx.stroke();
                }
                ctx.set_fill_style_str(&fill_css);
                ctx.fill();
            }
            DrawCommand::Text {
                text,
                pos,
                font,
                color,
                align,
            } => {
                ctx.set_font(font);
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
            }
        }
    }
}
