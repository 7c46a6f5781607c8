//! Key-value store for the last successful fetches and the manual assignments.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::prelude::*;

pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);
}

impl<T> StoreExt for T where T: Store + ?Sized {}

/// Typed access on top of the JSON values.
pub trait StoreExt: Store {
    /// Get and decode the value, treating an undecodable value as missing.
    fn get_as<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let value = self.get(key)?;
        serde_json::from_value(value)
            .inspect_err(|error| warn!(key, "failed to decode the stored value: {error:#}"))
            .ok()
    }

    fn set_as<V: Serialize + ?Sized>(&self, key: &str, value: &V) {
        match serde_json::to_value(value) {
            Ok(value) => self.set(key, value),
            Err(error) => warn!(key, "failed to encode the value: {error:#}"),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore(Mutex<HashMap<String, Value>>);

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_owned(), value);
    }
}

/// JSON file holding a single object.
///
/// The file is read once on open and rewritten on every update. I/O errors are logged and never
/// propagated: a broken store only costs the fallbacks.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl FileStore {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Self {
        let entries = Self::read_fallibly_from(path).unwrap_or_else(|error| {
            error!("failed to load the store: {error:#}");
            Map::new()
        });
        debug!(n_entries = entries.len(), "opened");
        Self { path: path.to_owned(), entries: Mutex::new(entries) }
    }

    fn read_fallibly_from(path: &Path) -> Result<Map<String, Value>> {
        if path.is_file() {
            let contents = std::fs::read(path).context("failed to read the file")?;
            serde_json::from_slice(&contents).context("failed to parse the file")
        } else {
            Ok(Map::new())
        }
    }

    fn write_fallibly(&self, entries: &Map<String, Value>) -> Result {
        let contents = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write `{}`", self.path.display()))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    #[instrument(skip_all, fields(key = key))]
    fn set(&self, key: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value);
        if let Err(error) = self.write_fallibly(&entries) {
            error!("failed to save the store: {error:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temporary_path() -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir().join(format!("battery-plan-{}-{nanos}.json", std::process::id()))
    }

    #[test]
    fn memory_store() {
        let store = MemoryStore::default();
        assert_eq!(store.get_as::<Vec<f64>>("prices"), None);
        store.set_as("prices", &[1.0, 2.0]);
        assert_eq!(store.get_as::<Vec<f64>>("prices"), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn undecodable_value_is_missing() {
        let store = MemoryStore::default();
        store.set("prices", Value::String("garbage".to_owned()));
        assert_eq!(store.get_as::<Vec<f64>>("prices"), None);
    }

    #[test]
    fn file_store_persists() {
        let path = temporary_path();
        FileStore::open(&path).set_as("answer", &42);
        assert_eq!(FileStore::open(&path).get_as::<u32>("answer"), Some(42));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupted_file_opens_empty() {
        let path = temporary_path();
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get("answer"), None);
        std::fs::remove_file(&path).unwrap();
    }
}
