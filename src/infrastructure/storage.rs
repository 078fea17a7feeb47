//! Key-value persistence behind the settings store.
//!
//! The engine never touches the filesystem directly; it goes through
//! [`KeyValueStore`] so hosts can decide where preferences live and tests can
//! substitute [`MemoryStore`].

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::error::Result;

/// String-keyed persistent store. Single-threaded; last write wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`. Absence and read failure both
    /// yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store used in tests and as a silent fallback when no durable
/// storage is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisting each key as a JSON file under the platform config
/// directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the standard config location (cross-platform).
    pub fn new() -> Self {
        let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push("rubyroo");
        Self { dir }
    }

    /// Store rooted at an explicit directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("rubyroo-a11y"), None);

        store.set("rubyroo-a11y", "{}").unwrap();
        assert_eq!(store.get("rubyroo-a11y").as_deref(), Some("{}"));

        store.set("rubyroo-a11y", r#"{"highContrast":true}"#).unwrap();
        assert_eq!(
            store.get("rubyroo-a11y").as_deref(),
            Some(r#"{"highContrast":true}"#)
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(tmp.path().join("rubyroo"));

        assert_eq!(store.get("rubyroo-a11y"), None);
        store.set("rubyroo-a11y", r#"{"fontSize":"large"}"#).unwrap();
        assert_eq!(
            store.get("rubyroo-a11y").as_deref(),
            Some(r#"{"fontSize":"large"}"#)
        );
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(tmp.path().join("nested").join("rubyroo"));
        store.set("rubyroo-a11y", "{}").unwrap();
        assert!(tmp.path().join("nested").join("rubyroo").join("rubyroo-a11y.json").exists());
    }

    #[test]
    fn test_file_store_unreadable_key_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(tmp.path().to_path_buf());
        assert_eq!(store.get("never-written"), None);
    }
}
