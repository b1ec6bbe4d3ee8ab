//! Rendering module
//!
//! `scene` builds a backend-independent draw list; `canvas` replays it on a
//! browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCommand, Frame, TextAlign, build_frame};
