//! Queries and subscriptions that follow the change feed.

use std::collections::BTreeSet;
use std::sync::Arc;

use leadflow_core::model::{Collection, Record};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use super::batch::from_document;
use super::{ChangeEvent, Document, DocumentStore, Query, StoreError};

/// Delivers the full result of a query now and again after every change to
/// its collection. Dropping it unsubscribes.
pub struct LiveQuery {
    store: Arc<dyn DocumentStore>,
    collection: Collection,
    query: Query,
    changes: broadcast::Receiver<ChangeEvent>,
    primed: bool,
}

impl LiveQuery {
    /// Subscribes before the first read, so no change between the two is missed.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, collection: Collection, query: Query) -> Self {
        let changes = store.changes();
        Self {
            store,
            collection,
            query,
            changes,
            primed: false,
        }
    }

    /// Collection being watched.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Waits for the next result set.
    ///
    /// The first call returns immediately. Returns `None` once the store has
    /// been dropped.
    pub async fn next(&mut self) -> Option<Result<Vec<Document>, StoreError>> {
        if !self.primed {
            self.primed = true;
            return Some(self.run().await);
        }

        let watched = BTreeSet::from([self.collection]);
        loop {
            match self.changes.recv().await {
                Ok(event) if event.touches(&watched) => return Some(self.run().await),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(collection = %self.collection, skipped, "Live query lagged, re-reading");
                    return Some(self.run().await);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Like `next`, decoding each document as `T`.
    pub async fn next_records<T: Record>(&mut self) -> Option<Result<Vec<T>, StoreError>> {
        let documents = match self.next().await? {
            Ok(documents) => documents,
            Err(err) => return Some(Err(err)),
        };
        Some(documents.into_iter().map(from_document).collect())
    }

    async fn run(&self) -> Result<Vec<Document>, StoreError> {
        debug!(collection = %self.collection, "Running live query");
        self.store.query(self.collection, &self.query).await
    }
}

/// Watches a set of collections without reading them.
#[derive(Debug)]
pub struct Subscription {
    watched: BTreeSet<Collection>,
    changes: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Subscribes to changes of `watched` made from now on.
    #[must_use]
    pub fn new(store: &dyn DocumentStore, watched: impl IntoIterator<Item = Collection>) -> Self {
        Self {
            watched: watched.into_iter().collect(),
            changes: store.changes(),
        }
    }

    /// Collections being watched.
    #[must_use]
    pub const fn watched(&self) -> &BTreeSet<Collection> {
        &self.watched
    }

    /// Waits for a change to a watched collection.
    ///
    /// After a lag the event lists every watched collection. Returns `None`
    /// once the store has been dropped.
    pub async fn changed(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.changes.recv().await {
                Ok(event) if event.touches(&self.watched) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => return Some(self.everything()),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Drains pending events, returning true if any touched a watched collection.
    pub fn drain_pending(&mut self) -> bool {
        let mut touched = false;
        loop {
            match self.changes.try_recv() {
                Ok(event) => touched |= event.touches(&self.watched),
                Err(TryRecvError::Lagged(_)) => touched = true,
                Err(TryRecvError::Empty | TryRecvError::Closed) => return touched,
            }
        }
    }

    fn everything(&self) -> ChangeEvent {
        ChangeEvent {
            collections: self.watched.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_live_query_delivers_now_and_on_change() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        store
            .insert(Collection::Leads, json!({"id": "lead_1", "owner": "a@x.com"}))
            .await
            .unwrap();

        let mut live = LiveQuery::new(
            Arc::clone(&store),
            Collection::Leads,
            Query::all().eq("owner", "a@x.com"),
        );
        assert_eq!(live.next().await.unwrap().unwrap().len(), 1);

        store
            .insert(Collection::Calls, json!({"id": "call_1"}))
            .await
            .unwrap();
        store
            .insert(Collection::Leads, json!({"id": "lead_2", "owner": "a@x.com"}))
            .await
            .unwrap();

        let docs = live.next().await.unwrap().unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_subscription_ignores_unwatched_collections() {
        let store = MemoryStore::new();
        let mut sub = Subscription::new(&store, [Collection::Payments]);

        store
            .insert(Collection::Leads, json!({"id": "lead_1"}))
            .await
            .unwrap();
        assert!(!sub.drain_pending());

        store
            .insert(Collection::Payments, json!({"id": "pay_1"}))
            .await
            .unwrap();
        let event = sub.changed().await.unwrap();
        assert!(event.collections.contains(&Collection::Payments));
    }

    #[tokio::test]
    async fn test_drain_pending_empties_the_queue() {
        let store = MemoryStore::new();
        let mut sub = Subscription::new(&store, [Collection::Leads]);

        store
            .insert(Collection::Leads, json!({"id": "lead_1"}))
            .await
            .unwrap();
        store
            .insert(Collection::Leads, json!({"id": "lead_2"}))
            .await
            .unwrap();

        assert!(sub.drain_pending());
        assert!(!sub.drain_pending());
    }
}
