//! # Storefront JSON-file store
//!
//! Production [`KeyValueStore`] backend persisting each storage key as one
//! JSON document on disk (`<root>/inventory.json`, `<root>/products.json`,
//! ...). The layout is deliberately transparent: the documents are plain
//! JSON blobs, inspectable with any editor.
//!
//! Writes land in a temporary sibling file first and are renamed into
//! place, so a crash mid-write leaves the previous document intact rather
//! than a truncated one. There is no cross-process locking: two processes
//! writing the same key end in last-write-wins, which is the accepted
//! concurrency model of the whole system.
//!
//! ## Example
//!
//! ```no_run
//! use storefront_jsonfile::JsonFileStore;
//! use storefront_core::storage::{KeyValueStore, StorageKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::open("./data").await?;
//! store.set(StorageKey::Cart, b"[]").await?;
//! let payload = store.get(StorageKey::Cart).await?;
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::{Path, PathBuf};
use storefront_core::storage::{KeyValueStore, Result, StorageError, StorageKey};

/// File-backed key-value store, one JSON document per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store over an existing directory without touching the
    /// file system.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| io_error("create store directory", &root, &e))?;
        Ok(Self { root })
    }

    /// The directory holding the documents.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn temp_path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!(".{}.json.tmp", key.as_str()))
    }
}

fn io_error(op: &str, path: &Path, err: &io::Error) -> StorageError {
    StorageError::Io(format!("{op} {}: {err}", path.display()))
}

impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                metrics::counter!("storage.read").increment(1);
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("read", &path, &err)),
        }
    }

    async fn set(&self, key: StorageKey, value: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let temp = self.temp_path_for(key);

        tokio::fs::write(&temp, value)
            .await
            .map_err(|e| io_error("write", &temp, &e))?;
        tokio::fs::rename(&temp, &path)
            .await
            .map_err(|e| io_error("rename", &path, &e))?;

        metrics::counter!("storage.write").increment(1);
        tracing::debug!(key = key.as_str(), bytes = value.len(), "wrote document");
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error("remove", &path, &err)),
        }
    }

    async fn contains(&self, key: StorageKey) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(key))
            .await
            .unwrap_or(false))
    }
}
