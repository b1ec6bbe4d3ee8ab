//! Persisted highscore
//!
//! A single integer under the `highscore` key. Anything unreadable counts as 0.

use crate::error::BounceError;
use crate::persistence::Storage;

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value
    pub fn parse(raw: &str) -> Result<u64, BounceError> {
        raw.trim()
            .parse::<u64>()
            .map_err(|_| BounceError::MalformedHighScore(raw.to_string()))
    }

    /// Read the stored value, writing 0 if the key is absent
    pub fn load(storage: &mut dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match Self::parse(&raw) {
                Ok(best) => {
                    log::info!("Loaded highscore {}", best);
                    Self::new(best)
                }
                Err(e) => {
                    log::warn!("{}; treating as 0", e);
                    Self::default()
                }
            },
            Ok(None) => {
                let fresh = Self::default();
                fresh.save(storage);
                fresh
            }
            Err(e) => {
                log::warn!("Highscore unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Fold a finished session in. Returns true and persists when it is a new best.
    pub fn record(&mut self, score: u64, storage: &mut dyn Storage) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save(storage);
        true
    }

    /// Fire-and-forget write
    pub fn save(&self, storage: &mut dyn Storage) {
        match storage.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::debug!("Highscore saved ({})", self.best),
            Err(e) => log::warn!("Failed to save highscore: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_absent_key_initialises_to_zero() {
        let mut storage = MemoryStorage::new();
        let high = HighScore::load(&mut storage);
        assert_eq!(high.best, 0);
        assert_eq!(storage.get("highscore").unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_malformed_value_is_zero() {
        let mut storage = MemoryStorage::new();
        storage.set("highscore", "lots").unwrap();
        assert_eq!(HighScore::load(&mut storage).best, 0);
        assert!(matches!(
            HighScore::parse("-3"),
            Err(BounceError::MalformedHighScore(_))
        ));
    }

    #[test]
    fn test_record_only_improvements() {
        let mut storage = MemoryStorage::new();
        storage.set("highscore", "20").unwrap();
        let mut high = HighScore::load(&mut storage);
        assert_eq!(high.best, 20);

        assert!(!high.record(20, &mut storage));
        assert!(!high.record(5, &mut storage));
        assert_eq!(storage.get("highscore").unwrap().as_deref(), Some("20"));

        assert!(high.record(21, &mut storage));
        assert_eq!(high.best, 21);
        assert_eq!(storage.get("highscore").unwrap().as_deref(), Some("21"));
    }
}
