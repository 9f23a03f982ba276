//! String key-value storage for preferences and the offline profile cache.
//!
//! Backends report failures through [`KeyValueStore`], but application code
//! goes through the `get_storage_*` / `set_storage_*` helpers, which log the
//! failure and degrade to "no value" instead of propagating it.

use std::{
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::{
    data_file_path,
    read_json_file,
    write_json_file,
};
use crate::core::ProfileError;

pub const STORAGE_FILE: &str = "storage.json";

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ProfileError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ProfileError>;
}

pub fn get_storage_item<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Error reading from storage: {e}");
            None
        }
    }
}

/// Returns whether the value was written.
pub fn set_storage_item<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set_item(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Error writing to storage: {e}");
            false
        }
    }
}

pub fn get_storage_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = get_storage_item(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Error parsing '{key}' from storage: {e}");
            None
        }
    }
}

/// Returns whether the value was serialized and written.
pub fn set_storage_json<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => set_storage_item(store, key, &json),
        Err(e) => {
            tracing::warn!("Error serializing '{key}' for storage: {e}");
            false
        }
    }
}

/// Keeps every entry in one JSON object on disk. The whole file is rewritten
/// on each change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read storage {}: {e}. Starting empty.", path.display());
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn open_default() -> Self {
        Self::open(data_file_path(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, String>, ProfileError> {
        Ok(read_json_file(path)?.unwrap_or_default())
    }

    fn flush(&self) -> Result<(), ProfileError> {
        write_json_file(&self.path, &self.entries)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(ProfileError::Storage { key: key.to_string(), message: e.to_string() });
        }
        Ok(())
    }
}

/// In-process store, optionally with a byte quota counted over keys and
/// values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { entries: HashMap::new(), quota: Some(quota) }
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            quota: None,
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_bytes_without(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(ProfileError::QuotaExceeded { key: key.to_string(), needed, available });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path);
        assert_eq!(get_storage_item(&store, "theme"), None);
        assert!(set_storage_item(&mut store, "theme", "light"));
        assert!(set_storage_json(&mut store, "numbers", &vec![1, 2, 3]));

        let reopened = FileStore::open(&path);
        assert_eq!(get_storage_item(&reopened, "theme").as_deref(), Some("light"));
        assert_eq!(get_storage_json::<Vec<u32>, _>(&reopened, "numbers"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(get_storage_item(&store, "theme"), None);
    }

    #[test]
    fn failed_flush_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut store = FileStore::open(blocker.join("storage.json"));
        let err = store.set_item("theme", "light").unwrap_err();
        assert!(matches!(err, ProfileError::Storage { ref key, .. } if key == "theme"));
        assert_eq!(store.get_item("theme").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let mut store = MemoryStore::with_quota(16);
        assert!(set_storage_item(&mut store, "theme", "dark"));
        assert!(!set_storage_item(&mut store, "local_profiles", "[{\"id\":\"coffee-1\"}]"));
        assert_eq!(get_storage_item(&store, "local_profiles"), None);

        // Overwriting an existing key only counts the new value.
        assert!(set_storage_item(&mut store, "theme", "light"));
    }

    #[test]
    fn unparseable_json_reads_as_missing() {
        let store = MemoryStore::with_entries([("local_profiles", "not json")]);
        assert_eq!(get_storage_json::<Vec<String>, _>(&store, "local_profiles"), None);
    }
}
