//! In-memory key-value store for fast, deterministic testing.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use storefront_core::storage::{KeyValueStore, Result, StorageKey};

/// In-memory [`KeyValueStore`] backed by a `HashMap`.
///
/// Complements [`RecordingBus`](crate::RecordingBus) to provide a complete
/// in-memory testing backend. Cloning is cheap and shares the underlying
/// map, so a test can hand a clone to a service and still inspect the
/// stored payloads afterwards.
///
/// # Example
///
/// ```
/// use storefront_testing::MemoryStore;
/// use storefront_core::storage::{KeyValueStore, StorageKey};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// store.set(StorageKey::Cart, b"[]").await?;
/// assert!(store.contains(StorageKey::Cart).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<StorageKey, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a payload under one key.
    ///
    /// Convenient for corrupt-payload and fail-open tests.
    #[must_use]
    pub fn with_payload(key: StorageKey, payload: &[u8]) -> Self {
        let store = Self::new();
        store
            .data
            .write()
            .unwrap()
            .insert(key, payload.to_vec());
        store
    }

    /// Clear all stored payloads (for test isolation).
    pub fn clear(&self) {
        self.data.write().unwrap().clear();
    }

    /// The number of keys currently holding a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// Check if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().is_empty()
    }

    /// Check if a key holds a value, synchronously.
    ///
    /// Useful for assertions without awaiting the trait method.
    #[must_use]
    pub fn contains_key(&self, key: StorageKey) -> bool {
        self.data.read().unwrap().contains_key(&key)
    }

    /// Snapshot the raw payload under a key, synchronously.
    #[must_use]
    pub fn payload(&self, key: StorageKey) -> Option<Vec<u8>> {
        self.data.read().unwrap().get(&key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().unwrap().get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: &[u8]) -> Result<()> {
        self.data.write().unwrap().insert(key, value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<()> {
        self.data.write().unwrap().remove(&key);
        Ok(())
    }

    async fn contains(&self, key: StorageKey) -> Result<bool> {
        Ok(self.data.read().unwrap().contains_key(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set(StorageKey::Inventory, b"[1,2,3]").await.unwrap();

        let payload = store.get(StorageKey::Inventory).await.unwrap();
        assert_eq!(payload.as_deref(), Some(b"[1,2,3]".as_slice()));
    }

    #[tokio::test]
    async fn get_of_unwritten_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get(StorageKey::Cart).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set(StorageKey::Cart, b"[]").await.unwrap();
        store.remove(StorageKey::Cart).await.unwrap();
        store.remove(StorageKey::Cart).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clones_share_the_underlying_map() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set(StorageKey::Products, b"[]").await.unwrap();
        assert!(store.contains_key(StorageKey::Products));
    }
}
