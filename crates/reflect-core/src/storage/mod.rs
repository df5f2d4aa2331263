mod config;
pub mod log;
pub mod sqlite;

pub use config::{Backend, Config, LoggingConfig, StorageConfig};
pub use log::{BoundedLog, Codec, Identified, Json, PlainText, SingleSlot};
pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{CoreError, StoreError};

/// Returns `~/.config/reflect[-dev]/` based on REFLECT_ENV.
///
/// Set REFLECT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REFLECT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("reflect-dev")
    } else {
        base_dir.join("reflect")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// String-keyed durable medium the engine persists into.
///
/// Every value is a string; structure is layered on top by a [`Codec`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl KeyValueStore for Box<dyn KeyValueStore + Send> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Volatile store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The logical slots the engine owns. Each is independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    MoodLatest,
    MoodHistory,
    JournalDraft,
    JournalEntries,
}

impl StoreKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::MoodLatest => "mood_latest",
            StoreKey::MoodHistory => "mood_history",
            StoreKey::JournalDraft => "journal_draft",
            StoreKey::JournalEntries => "journal_entries",
        }
    }
}

/// Maps [`StoreKey`]s to concrete store keys under an optional prefix.
///
/// An empty prefix yields the bare key names; `"reflect"` yields
/// `reflect_mood_latest` and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, key: StoreKey) -> String {
        if self.prefix.is_empty() {
            key.as_str().to_string()
        } else {
            format!("{}_{}", self.prefix, key.as_str())
        }
    }
}

/// Open the backend selected by `config`.
///
/// # Errors
/// Returns an error if the SQLite file cannot be opened or migrated.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore + Send>, CoreError> {
    match config.backend {
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
        Backend::Sqlite => {
            let path = match &config.path {
                Some(path) => path.clone(),
                None => data_dir()?.join("reflect.db"),
            };
            tracing::debug!(path = %path.display(), "opening sqlite store");
            Ok(Box::new(SqliteStore::open(&path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn keyspace_without_prefix_uses_bare_names() {
        let keys = Keyspace::default();
        assert_eq!(keys.key(StoreKey::MoodLatest), "mood_latest");
        assert_eq!(keys.key(StoreKey::MoodHistory), "mood_history");
        assert_eq!(keys.key(StoreKey::JournalDraft), "journal_draft");
        assert_eq!(keys.key(StoreKey::JournalEntries), "journal_entries");
    }

    #[test]
    fn keyspace_with_prefix_joins_with_underscore() {
        let keys = Keyspace::new("reflect");
        assert_eq!(keys.key(StoreKey::JournalEntries), "reflect_journal_entries");
    }

    #[test]
    fn open_store_memory_backend() {
        let config = StorageConfig {
            backend: Backend::Memory,
            ..StorageConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn open_store_sqlite_backend_at_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: Backend::Sqlite,
            path: Some(dir.path().join("store.db")),
            ..StorageConfig::default()
        };
        {
            let mut store = open_store(&config).unwrap();
            store.set("a", "1").unwrap();
        }
        let store = open_store(&config).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
