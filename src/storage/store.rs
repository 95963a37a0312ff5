//! Key-value backends
//!
//! A store holds one JSON document per key. `FileStore` maps each key to
//! `<data dir>/<key>.json`; `MemoryStore` keeps documents in a map.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ZbbError;

use super::file_io::{read_optional, write_atomic};

/// Raw document storage keyed by string
pub trait KeyValueStore {
    /// Read the document stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>, ZbbError>;

    /// Replace the document stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), ZbbError>;

    /// All keys currently holding a document
    fn keys(&self) -> Result<Vec<String>, ZbbError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, ZbbError> {
        read_optional(self.path_for(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ZbbError> {
        write_atomic(self.path_for(key), value.as_bytes())
    }

    fn keys(&self) -> Result<Vec<String>, ZbbError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            ZbbError::Storage(format!("Failed to list {}: {}", self.dir.display(), e))
        })?;

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// In-memory store, used for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, ZbbError> {
        let data = self
            .data
            .read()
            .map_err(|e| ZbbError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ZbbError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ZbbError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, ZbbError> {
        let data = self
            .data
            .read()
            .map_err(|e| ZbbError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.keys().cloned().collect())
    }
}
