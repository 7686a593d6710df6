//! Change notifications published after every committed batch.

use std::collections::BTreeSet;

use leadflow_core::model::Collection;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Buffered events per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 256;

/// Collections touched by one committed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Collections written.
    pub collections: BTreeSet<Collection>,
}

impl ChangeEvent {
    /// Returns true if the batch wrote any of `watched`.
    #[must_use]
    pub fn touches(&self, watched: &BTreeSet<Collection>) -> bool {
        !self.collections.is_disjoint(watched)
    }
}

/// Process-local fan-out of change events.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Creates a feed with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        info!(capacity = CHANNEL_CAPACITY, "Change feed initialized");
        Self { sender }
    }

    /// Receives every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Notifies subscribers. Empty events are dropped.
    pub fn publish(&self, collections: BTreeSet<Collection>) {
        if collections.is_empty() {
            return;
        }
        debug!(?collections, "Publishing change");
        // No receivers is not an error.
        let _ = self.sender.send(ChangeEvent { collections });
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_collections() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(BTreeSet::new());
        feed.publish(BTreeSet::from([Collection::Leads, Collection::Calls]));

        let event = rx.recv().await.unwrap();
        assert!(event.touches(&BTreeSet::from([Collection::Calls])));
        assert!(!event.touches(&BTreeSet::from([Collection::Payments])));
        assert!(rx.try_recv().is_err());
    }
}
