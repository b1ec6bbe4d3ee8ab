//! Crate error type

use thiserror::Error;

/// Errors raised at the platform edges. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum BounceError {
    /// The page cannot give us a 2D drawing surface
    #[error("unsupported rendering surface: {0}")]
    UnsupportedSurface(String),

    /// A required DOM element or browser object is missing
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Storage backend refused a read or write
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored highscore is not a non-negative integer
    #[error("malformed highscore: {0:?}")]
    MalformedHighScore(String),

    /// Stored settings failed to (de)serialize
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl BounceError {
    /// Wrap an opaque JS exception as a storage failure
    pub fn storage(err: wasm_bindgen::JsValue) -> Self {
        Self::Storage(format!("{:?}", err))
    }
}
