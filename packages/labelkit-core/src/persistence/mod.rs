//! Key-value store collaborator used for templates and the selection.
//!
//! The engine only needs string get/set. [`MemoryStore`] keeps values in
//! process; [`FileStore`] writes one checksummed file per key.

mod file_store;
pub mod io_utils;
#[cfg(test)]
mod test;

pub use file_store::FileStore;

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use serde::de::DeserializeOwned;

use crate::error::LabelError;

/// Generic string store backing persisted engine state.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Returns the value under `key`, or `None` when never written.
    fn get(&self, key: &str) -> Result<Option<String>, LabelError>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), LabelError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LabelError> {
        let entries = self.entries.read().map_err(|_| LabelError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LabelError> {
        let mut entries = self.entries.write().map_err(|_| LabelError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and parses the JSON value under `key`.
///
/// Missing keys and unreadable or unparsable values all yield `None`;
/// the latter two are logged.
pub(crate) fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read '{}' from store, starting empty: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unparsable '{}' in store: {}", key, e);
            None
        }
    }
}
