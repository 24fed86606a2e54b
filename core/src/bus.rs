//! Change notification bus abstraction.
//!
//! Writers (inventory edits, product edits, content edits) are decoupled
//! from the many independent readers that must refresh when storage
//! changes. A writer persists first, then publishes a [`ChangeNotice`];
//! readers reload from storage when a topic they care about fires.
//!
//! # Key Principles
//!
//! - **Persist first**: a notice always refers to state already written
//! - **Fire-and-forget**: publishing never fails and never blocks on
//!   subscribers; zero subscribers is a normal state
//! - **No payload contract**: a notice carries at most an optional `detail`
//!   hint, and subscribers must not depend on it being present
//! - **No replay**: notices do not survive a restart; state is re-derived
//!   from storage on load, never from replayed notices
//!
//! # Implementations
//!
//! - `ChangeHub` (in `storefront-runtime`): broadcast-channel dispatch
//! - `RecordingBus` (in `storefront-testing`): captures notices for asserts

use serde::{Deserialize, Serialize};
use std::fmt;

/// The notification topics observed in the system.
///
/// `as_str` yields the camelCase wire names so logs and any external
/// tooling share one vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeTopic {
    /// The `inventory` document changed.
    InventoryUpdated,

    /// The `products` document changed.
    ProductsUpdated,

    /// The `siteContent` document changed.
    SiteContentUpdated,

    /// The `storeSettings` document changed.
    StoreSettingsUpdated,

    /// The `cart` document changed.
    CartUpdated,
}

impl ChangeTopic {
    /// The topic's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InventoryUpdated => "inventoryUpdated",
            Self::ProductsUpdated => "productsUpdated",
            Self::SiteContentUpdated => "siteContentUpdated",
            Self::StoreSettingsUpdated => "storeSettingsUpdated",
            Self::CartUpdated => "cartUpdated",
        }
    }
}

impl fmt::Display for ChangeTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotice {
    /// What changed.
    pub topic: ChangeTopic,

    /// Optional type hint (e.g. which kind of edit triggered the change).
    /// Subscribers must tolerate its absence.
    pub detail: Option<String>,
}

impl ChangeNotice {
    /// A notice with no detail hint.
    #[must_use]
    pub const fn new(topic: ChangeTopic) -> Self {
        Self {
            topic,
            detail: None,
        }
    }

    /// A notice carrying a detail hint.
    #[must_use]
    pub fn with_detail(topic: ChangeTopic, detail: impl Into<String>) -> Self {
        Self {
            topic,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for ChangeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({detail})", self.topic),
            None => write!(f, "{}", self.topic),
        }
    }
}

/// Publisher side of the change bus.
///
/// Synchronous and infallible by contract: dispatch is fire-and-forget with
/// no ordering guarantee between subscribers and no delivery guarantee at
/// all. Services hold this as `Arc<dyn ChangePublisher>` so tests can swap
/// in a recording implementation.
pub trait ChangePublisher: Send + Sync {
    /// Publish a notice to all current subscribers.
    fn publish(&self, notice: ChangeNotice);

    /// Publish a bare topic with no detail.
    fn publish_topic(&self, topic: ChangeTopic) {
        self.publish(ChangeNotice::new(topic));
    }
}

/// A publisher that drops every notice.
///
/// Useful where a component is exercised without any subscribed views.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl ChangePublisher for NullPublisher {
    fn publish(&self, _notice: ChangeNotice) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_wire_names_are_stable() {
        assert_eq!(ChangeTopic::InventoryUpdated.as_str(), "inventoryUpdated");
        assert_eq!(ChangeTopic::ProductsUpdated.as_str(), "productsUpdated");
        assert_eq!(ChangeTopic::SiteContentUpdated.as_str(), "siteContentUpdated");
        assert_eq!(
            ChangeTopic::StoreSettingsUpdated.as_str(),
            "storeSettingsUpdated"
        );
        assert_eq!(ChangeTopic::CartUpdated.as_str(), "cartUpdated");
    }

    #[test]
    fn notice_display_includes_detail_when_present() {
        let bare = ChangeNotice::new(ChangeTopic::CartUpdated);
        assert_eq!(format!("{bare}"), "cartUpdated");

        let hinted = ChangeNotice::with_detail(ChangeTopic::InventoryUpdated, "stock-edit");
        assert_eq!(format!("{hinted}"), "inventoryUpdated (stock-edit)");
    }

    #[test]
    fn null_publisher_accepts_notices() {
        NullPublisher.publish_topic(ChangeTopic::ProductsUpdated);
    }
}
