//! # Storefront Testing
//!
//! Testing utilities and in-memory backends for the storefront state engine.
//!
//! This crate provides:
//! - [`MemoryStore`]: `HashMap`-backed [`KeyValueStore`] implementation
//! - [`RecordingBus`]: a [`ChangePublisher`] that captures every notice
//! - [`FixedClock`] / [`test_clock`]: deterministic time
//! - [`fixtures`]: a small deterministic catalog for seeding tests
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_testing::{fixtures, MemoryStore, RecordingBus};
//!
//! #[tokio::test]
//! async fn stock_edit_notifies_both_topics() {
//!     let store = Arc::new(MemoryStore::new());
//!     let bus = Arc::new(RecordingBus::new());
//!     let inventory = InventoryStore::new(store, bus.clone(), fixtures::sample_catalog());
//!
//!     let records = inventory.load().await.unwrap();
//!     inventory.set_stock(&records[0].id, 3).await.unwrap();
//!
//!     assert_eq!(bus.topics().len(), 4); // two saves, two topics each
//! }
//! ```
//!
//! [`KeyValueStore`]: storefront_core::storage::KeyValueStore
//! [`ChangePublisher`]: storefront_core::bus::ChangePublisher

mod memory_store;
mod recording_bus;

pub mod fixtures;

pub use memory_store::MemoryStore;
pub use recording_bus::RecordingBus;

use chrono::{DateTime, Utc};
use storefront_core::environment::Clock;

/// Fixed clock for deterministic tests.
///
/// Always returns the same time, making tests reproducible.
///
/// # Example
///
/// ```
/// use storefront_testing::FixedClock;
/// use storefront_core::environment::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}
