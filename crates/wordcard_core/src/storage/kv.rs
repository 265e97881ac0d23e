//! Key-value ("local storage") implementations.
//!
//! # Responsibility
//! - Store one string value per key, mirroring browser local storage.
//! - Expose one key as a [`SnapshotStore`] so the word collection can live
//!   in local storage with the same layout as the JSON file.
//!
//! # Invariants
//! - Keys are limited to `[A-Za-z0-9_.-]` so a key always maps to one file
//!   inside the storage directory.

use super::{KeyValueStore, SnapshotStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key holding the serialized word list in local storage.
pub const LOCAL_WORDS_KEY: &str = "vocab-words";

/// Process-local key-value store.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> StorageResult<T> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&mut items))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.with_items(|items| {
            items.remove(key);
        })
    }
}

/// Directory-backed key-value store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct DirKeyValueStore {
    dir: PathBuf,
}

impl DirKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// One key of a [`KeyValueStore`] used as a collection snapshot.
#[derive(Debug, Clone)]
pub struct KeyValueSnapshot<K: KeyValueStore> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> KeyValueSnapshot<K> {
    pub fn new(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Snapshot under the default word list key.
    pub fn words(store: K) -> Self {
        Self::new(store, LOCAL_WORDS_KEY)
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}

impl<K: KeyValueStore> SnapshotStore for KeyValueSnapshot<K> {
    fn read(&self) -> StorageResult<Option<String>> {
        self.store.get_item(&self.key)
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        self.store.set_item(&self.key, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::{DirKeyValueStore, KeyValueSnapshot, MemoryKeyValueStore};
    use crate::storage::{KeyValueStore, SnapshotStore, StorageError};

    #[test]
    fn memory_store_roundtrip_and_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn dir_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirKeyValueStore::new(dir.path().join("local"));

        store.set_item("vocab-words", "[]").unwrap();
        assert!(dir.path().join("local").join("vocab-words.json").exists());
        assert_eq!(store.get_item("vocab-words").unwrap().as_deref(), Some("[]"));

        store.remove_item("vocab-words").unwrap();
        store.remove_item("vocab-words").unwrap();
        assert_eq!(store.get_item("vocab-words").unwrap(), None);
    }

    #[test]
    fn dir_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirKeyValueStore::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = store.set_item(key, "x").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key `{key}`");
        }
    }

    #[test]
    fn snapshot_reads_absent_key_as_none() {
        let snapshot = KeyValueSnapshot::words(MemoryKeyValueStore::new());
        assert_eq!(snapshot.read().unwrap(), None);
        snapshot.write("[]").unwrap();
        assert_eq!(
            snapshot.store().get_item("vocab-words").unwrap().as_deref(),
            Some("[]")
        );
    }
}
