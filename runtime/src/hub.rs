//! Broadcast-channel implementation of the change bus.

use storefront_core::bus::{ChangeNotice, ChangePublisher};
use tokio::sync::broadcast;

/// Default subscriber channel capacity.
const DEFAULT_CAPACITY: usize = 16;

/// Process-wide change notification hub.
///
/// One broadcast channel carries every [`ChangeNotice`]; subscribers filter
/// by topic on their side. Dispatch is fire-and-forget: publishing with no
/// subscribers succeeds, a lagging subscriber loses the oldest notices
/// rather than blocking the writer, and nothing is replayed across a
/// restart (readers re-derive state from storage on load).
///
/// # Example
///
/// ```
/// use storefront_runtime::ChangeHub;
/// use storefront_core::bus::{ChangePublisher, ChangeTopic};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let hub = ChangeHub::new();
/// let mut rx = hub.subscribe();
///
/// hub.publish_topic(ChangeTopic::InventoryUpdated);
///
/// let notice = rx.recv().await.unwrap();
/// assert_eq!(notice.topic, ChangeTopic::InventoryUpdated);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChangeHub {
    tx: broadcast::Sender<ChangeNotice>,
}

impl ChangeHub {
    /// Create a hub with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a hub buffering up to `capacity` notices per subscriber.
    ///
    /// Increase the capacity when slow subscribers frequently lag behind
    /// bursts of writes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all notices published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.tx.subscribe()
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangePublisher for ChangeHub {
    fn publish(&self, notice: ChangeNotice) {
        tracing::debug!(topic = notice.topic.as_str(), "publishing change notice");
        // send only fails when no subscriber is attached, a normal state.
        let _ = self.tx.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::bus::ChangeTopic;

    #[tokio::test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if recv fails
    async fn all_subscribers_receive_each_notice() {
        let hub = ChangeHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish_topic(ChangeTopic::ProductsUpdated);

        assert_eq!(rx1.recv().await.unwrap().topic, ChangeTopic::ProductsUpdated);
        assert_eq!(rx2.recv().await.unwrap().topic, ChangeTopic::ProductsUpdated);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_not_an_error() {
        let hub = ChangeHub::new();
        hub.publish_topic(ChangeTopic::CartUpdated);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if recv fails
    async fn notices_arrive_in_publish_order() {
        let hub = ChangeHub::new();
        let mut rx = hub.subscribe();

        hub.publish_topic(ChangeTopic::InventoryUpdated);
        hub.publish_topic(ChangeTopic::ProductsUpdated);

        assert_eq!(rx.recv().await.unwrap().topic, ChangeTopic::InventoryUpdated);
        assert_eq!(rx.recv().await.unwrap().topic, ChangeTopic::ProductsUpdated);
    }
}
