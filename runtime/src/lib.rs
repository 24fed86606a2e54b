//! # Storefront Runtime
//!
//! Services coordinating storage, mirroring, and change notifications.
//!
//! Every mutation in this crate follows one cycle: read the current
//! document, mutate in memory, write the whole document back, then publish
//! a change notice. The inventory adapter
//! additionally mirrors each write into the catalog `products` document so
//! the two views of an entity never drift.
//!
//! ## Core Components
//!
//! - [`InventoryStore`]: loads, seeds, saves, and mirrors inventory records
//! - [`SizeStockEditor`]: per-size stock edits folded back into totals
//! - [`CartService`]: cart document with line merging
//! - [`SiteContentService`] / [`StoreSettingsService`]: the remaining
//!   admin-managed documents
//! - [`ChangeHub`]: broadcast-channel implementation of the change bus
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_runtime::{ChangeHub, InventoryStore};
//!
//! let hub = Arc::new(ChangeHub::new());
//! let inventory = InventoryStore::new(store, hub.clone(), catalog);
//!
//! let mut dashboard = hub.subscribe();
//! inventory.set_stock(&id, 3).await?;
//! let notice = dashboard.recv().await?; // inventoryUpdated
//! ```

mod cart;
mod content;
mod hub;
mod inventory_store;
mod size_stock;

pub use cart::CartService;
pub use content::{SiteContentService, StoreSettingsService};
pub use hub::ChangeHub;
pub use inventory_store::{InventoryStore, NewProduct, SeedPolicy};
pub use size_stock::SizeStockEditor;

/// Error types for the storefront services.
pub mod error {
    use storefront_core::ids::ProductId;
    use storefront_core::storage::StorageError;
    use thiserror::Error;

    /// Errors that can occur during service operations.
    ///
    /// The taxonomy is deliberately shallow: parse failures of persisted
    /// payloads never surface here (services fail open to defaults), so
    /// what remains is storage transport failures, rejected input, and
    /// lookups of absent products.
    #[derive(Error, Debug)]
    pub enum ServiceError {
        /// The underlying key-value store failed.
        #[error(transparent)]
        Storage(#[from] StorageError),

        /// A value could not be serialized for writing.
        #[error("Serialization failed: {0}")]
        Serialization(String),

        /// Input was rejected before any write happened.
        #[error("Validation failed: {0}")]
        Validation(String),

        /// No product with the given id exists.
        #[error("Product not found: {0}")]
        NotFound(ProductId),
    }

    impl ServiceError {
        /// Build a serialization error from any serde error.
        pub(crate) fn serialization(err: &serde_json::Error) -> Self {
            Self::Serialization(err.to_string())
        }
    }

    /// Result type for service operations.
    pub type Result<T> = std::result::Result<T, ServiceError>;
}

pub use error::ServiceError;
