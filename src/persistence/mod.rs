//! Key/value persistence
//!
//! The game stores a couple of small string values (highscore, settings). The
//! browser build uses LocalStorage; native builds and tests keep them in memory.

use std::collections::HashMap;

use crate::error::BounceError;

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, BounceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), BounceError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, BounceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BounceError> {
        (**self).set(key, value)
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BounceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BounceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, BounceError> {
        let inner = web_sys::window()
            .ok_or_else(|| BounceError::MissingElement("window".into()))?
            .local_storage()
            .map_err(BounceError::storage)?
            .ok_or_else(|| BounceError::Storage("localStorage unavailable".into()))?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BounceError> {
        self.inner.get_item(key).map_err(BounceError::storage)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BounceError> {
        self.inner.set_item(key, value).map_err(BounceError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("highscore").unwrap(), None);
        storage.set("highscore", "12").unwrap();
        assert_eq!(storage.get("highscore").unwrap().as_deref(), Some("12"));
    }
}
