//! # Storefront Core
//!
//! Core domain types and traits for the storefront state engine.
//!
//! This crate provides the building blocks for a catalog/inventory system
//! whose single source of truth is a key-value store of JSON documents:
//!
//! - **Domain records**: [`inventory::InventoryRecord`] (stock-tracking view)
//!   and [`product::Product`] (catalog-facing view) of the same entity
//! - **Pure derivations**: [`status::StockStatus`] from stock levels,
//!   [`sizes::SizeStockMap`] folding per-size counts into totals,
//!   the [`catalog`] filter/sort pipeline
//! - **Seams**: the [`storage::KeyValueStore`] trait for persistence and the
//!   [`bus::ChangePublisher`] trait for change notifications
//!
//! ## Architecture Principles
//!
//! - Derived fields are never authoritative: `status` is recomputed from
//!   `(stock, threshold)` after every mutation and on every load
//! - Writers keep the `inventory` and `products` documents in sync and
//!   publish a change notice after each persisted mutation
//! - Malformed persisted data fails open to defaults, never to an error
//!
//! ## Example
//!
//! ```
//! use storefront_core::status::StockStatus;
//!
//! assert_eq!(StockStatus::for_levels(0, 10), StockStatus::OutOfStock);
//! assert_eq!(StockStatus::for_levels(10, 10), StockStatus::LowStock);
//! assert_eq!(StockStatus::for_levels(11, 10), StockStatus::InStock);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod bus;
pub mod catalog;
pub mod content;
pub mod ids;
pub mod inventory;
pub mod price;
pub mod product;
pub mod sizes;
pub mod status;
pub mod storage;

/// Environment module - dependency injection traits.
///
/// External dependencies are abstracted behind traits so services can be
/// tested deterministically. The only ambient dependency the core needs is
/// time (site content stamps a `lastUpdated` timestamp on save).
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// assert!(now.timestamp() > 0);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time.
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
