//! Key-value stores for raw record strings

use super::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Minimal string store the records are kept in
pub trait KeyValueStore {
    /// Read a record, `None` if it was never written
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write or replace a record
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a record; deleting a missing record is not an error
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside a directory
///
/// Writes go to a temporary file in the same directory which then replaces
/// the record, so a crash never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(self.path_for(key))?;

        log::trace!("Wrote record '{key}' to {}", self.dir.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and throwaway games
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("stats").unwrap(), None);
        store.put("stats", "{\"a\":1}").unwrap();
        assert_eq!(store.get("stats").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("nested").join("stats.json").exists());

        store.put("stats", "{}").unwrap();
        assert_eq!(store.get("stats").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.put("state", "{}").unwrap();
        store.remove("state").unwrap();
        store.remove("state").unwrap();
        assert_eq!(store.get("state").unwrap(), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
