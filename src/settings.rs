//! Game settings and preferences
//!
//! Persisted separately from the highscore as a JSON blob.

use serde::{Deserialize, Serialize};

use crate::error::BounceError;
use crate::persistence::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Global volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Opacity of the per-frame background fill. Below 1.0 leaves motion trails.
    pub trail_alpha: f32,
    /// Fixed RNG seed (otherwise taken from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            muted: false,
            trail_alpha: 1.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "bounce_settings";

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.trail_alpha = self.trail_alpha.clamp(0.0, 1.0);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, BounceError> {
        Ok(serde_json::from_str::<Settings>(json)?.sanitized())
    }

    pub fn to_json(&self) -> Result<String, BounceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings, falling back to defaults on anything unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring stored settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        let result = self
            .to_json()
            .and_then(|json| storage.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
