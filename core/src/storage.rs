//! Key-value storage abstraction.
//!
//! The whole system persists into five JSON documents behind one key-value
//! interface. Keeping the interface this narrow is what lets the
//! two-lists-in-sync invariant live in a single adapter instead of being
//! scattered across every write site.
//!
//! # Implementations
//!
//! - `MemoryStore` (in `storefront-testing`): fast, deterministic tests
//! - `JsonFileStore` (in `storefront-jsonfile`): production, one file per key
//!
//! # Failure semantics
//!
//! The trait reports transport failures only (`Io`). Whether a payload
//! *parses* is deliberately not this layer's concern: services treat
//! unparsable payloads as absent data and fall back to reseeding (fail
//! open), so a corrupt document can never wedge the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying transport failure (file system, ...).
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// A value could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The five persisted documents.
///
/// `as_str` yields the stable key names of the persisted layout; anything
/// else that reads the documents keys off these exact strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKey {
    /// The inventory record list.
    Inventory,

    /// The mirrored catalog product list.
    Products,

    /// Homepage content block.
    SiteContent,

    /// Currency and theme settings.
    StoreSettings,

    /// The shopper's cart.
    Cart,
}

impl StorageKey {
    /// All keys, in mirror order (`Inventory` before `Products`).
    pub const ALL: [Self; 5] = [
        Self::Inventory,
        Self::Products,
        Self::SiteContent,
        Self::StoreSettings,
        Self::Cart,
    ];

    /// The persisted key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Products => "products",
            Self::SiteContent => "siteContent",
            Self::StoreSettings => "storeSettings",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage backend for the persisted documents.
///
/// Implementations must be `Send + Sync` to be shared across tasks. All
/// operations are async because the production backend does file I/O; the
/// in-memory test backend resolves immediately.
///
/// # Concurrency
///
/// There is no cross-process (or cross-tab) concurrency control: two
/// writers racing on the same key end in last-write-wins. That is the
/// accepted model of this design; callers wanting stronger guarantees
/// must layer versioning on top explicitly.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw payload stored under a key.
    ///
    /// # Returns
    ///
    /// - `Some(bytes)` when the key holds a value
    /// - `None` when the key has never been written (not an error)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the read itself fails.
    fn get(&self, key: StorageKey) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Write the raw payload for a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write fails.
    fn set(&self, key: StorageKey, value: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Remove a key. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the removal fails.
    fn remove(&self, key: StorageKey) -> impl Future<Output = Result<()>> + Send;

    /// Check whether a key holds a value.
    ///
    /// Default implementation reads via [`KeyValueStore::get`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the check fails.
    fn contains(&self, key: StorageKey) -> impl Future<Output = Result<bool>> + Send {
        async move { Ok(self.get(key).await?.is_some()) }
    }
}
