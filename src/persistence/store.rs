use crate::persistence::files::{atomic_write, read_file};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Key for the day -> tasks map
pub const TASKS_KEY: &str = "tasks";

/// Key for the list of unavailable days
pub const UNAVAILABLE_DAYS_KEY: &str = "unavailableDays";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not decode stored value for '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Named text values that survive between sessions
pub trait Store {
    /// Stored text for `key`, or None if nothing was written yet
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Where `key` lives, for log messages
    fn location(&self, key: &str) -> String {
        key.to_string()
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(read_file(self.path_for(key))?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(atomic_write(self.path_for(key), value)?)
    }

    fn location(&self, key: &str) -> String {
        self.path_for(key).display().to_string()
    }
}

/// Store that forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load and decode a value. Ok(None) when absent or stored as empty text.
pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, StoreError> {
    let raw = match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Load a value, falling back to `fallback()` when it is absent or unreadable.
/// Failures are logged, never returned.
pub fn read_or_else<T, F>(store: &dyn Store, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "no stored value, using fallback");
            fallback()
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value, using fallback");
            fallback()
        }
    }
}

pub fn read<T: DeserializeOwned>(store: &dyn Store, key: &str, fallback: T) -> T {
    read_or_else(store, key, || fallback)
}

/// Encode and store a value. Failures are logged and reported as false; the
/// caller's in-memory value stays authoritative either way.
pub fn write<T: Serialize + ?Sized>(store: &mut dyn Store, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })
        .and_then(|json| store.set(key, &json));

    match result {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "failed to persist value");
            false
        }
    }
}
