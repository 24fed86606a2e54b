//! Change publisher that records every notice for assertions.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use std::sync::{Arc, Mutex};
use storefront_core::bus::{ChangeNotice, ChangePublisher, ChangeTopic};

/// A [`ChangePublisher`] that captures published notices.
///
/// Services publish into the bus exactly as in production; the test then
/// asserts on the captured sequence. Cloning shares the captured log.
///
/// # Example
///
/// ```
/// use storefront_testing::RecordingBus;
/// use storefront_core::bus::{ChangePublisher, ChangeTopic};
///
/// let bus = RecordingBus::new();
/// bus.publish_topic(ChangeTopic::CartUpdated);
///
/// assert_eq!(bus.topics(), vec![ChangeTopic::CartUpdated]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingBus {
    notices: Arc<Mutex<Vec<ChangeNotice>>>,
}

impl RecordingBus {
    /// Create a new bus with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice published so far, in publish order.
    #[must_use]
    pub fn notices(&self) -> Vec<ChangeNotice> {
        self.notices.lock().unwrap().clone()
    }

    /// Just the topics, in publish order.
    #[must_use]
    pub fn topics(&self) -> Vec<ChangeTopic> {
        self.notices.lock().unwrap().iter().map(|n| n.topic).collect()
    }

    /// How many notices were published for one topic.
    #[must_use]
    pub fn count_for(&self, topic: ChangeTopic) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.topic == topic)
            .count()
    }

    /// Drop the captured log (for multi-phase tests).
    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }
}

impl ChangePublisher for RecordingBus {
    fn publish(&self, notice: ChangeNotice) {
        self.notices.lock().unwrap().push(notice);
    }
}
