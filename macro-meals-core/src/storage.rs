//! Local key-value persistence.
//!
//! Mirrors the host platform's local storage: string keys, string values, no
//! ordering or transactions. The snooze record is the only thing the update
//! gate keeps here.

use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used by [`FileStore`] inside its data directory.
pub const STORE_FILENAME: &str = "local_storage.json";

/// Errors raised by a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error for {}: {1}", .0.display())]
    IoError(PathBuf, #[source] io::Error),
    #[error("Failed to parse {}: {1}", .0.display())]
    ParseError(PathBuf, #[source] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Volatile store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_values<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(f(&mut values))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_values(|values| values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_values(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_values(|values| {
            values.remove(key);
        })
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file; the data set is a handful of keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store that keeps its file in `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILENAME)
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StorageError::ParseError(path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::ParseError(path.clone(), e))?;
        write_file(&path, &json)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), StorageError> {
    fs::write(path, contents).map_err(|e| StorageError::IoError(path.to_path_buf(), e))
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}
