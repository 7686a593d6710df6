//! In-process document store.

use async_trait::async_trait;
use leadflow_core::model::Collection;
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use super::staging::{Collections, stage};
use super::{ChangeEvent, ChangeFeed, Document, DocumentStore, StoreError, WriteBatch};

/// Keeps every collection in memory; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
    feed: ChangeFeed,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.data.read().await.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.get("id").and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let touched = {
            let mut data = self.data.write().await;
            let staged = stage(&data, &batch)?;
            let touched = staged.touched();
            staged.apply_to(&mut data);
            touched
        };
        debug!(ops = batch.len(), ?touched, "Committed batch");
        self.feed.publish(touched);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WriteOp;
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Fundraisers,
                json!({"id": "fund_1", "title": "Winter drive", "collected": "0"}),
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_commit_applies_all_ops_and_notifies_once() {
        let store = seeded().await;
        let mut rx = store.changes();

        let batch = WriteBatch::new()
            .push(WriteOp::Insert {
                collection: Collection::Payments,
                document: json!({"id": "pay_1", "fundId": "fund_1", "amount": "400"}),
            })
            .increment(Collection::Fundraisers, "fund_1", "collected", dec!(400));
        store.commit(batch).await.unwrap();

        let fund = store.get(Collection::Fundraisers, "fund_1").await.unwrap().unwrap();
        assert_eq!(fund["collected"], json!("400"));
        assert_eq!(store.list(Collection::Payments).await.unwrap().len(), 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.collections.into_iter().collect::<Vec<_>>(),
            vec![Collection::Fundraisers, Collection::Payments]
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_commit_changes_nothing() {
        let store = seeded().await;
        let mut rx = store.changes();

        let batch = WriteBatch::new()
            .increment(Collection::Fundraisers, "fund_1", "collected", dec!(400))
            .increment(Collection::Fundraisers, "fund_missing", "collected", dec!(1));
        let err = store.commit(batch).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        let fund = store.get(Collection::Fundraisers, "fund_1").await.unwrap().unwrap();
        assert_eq!(fund["collected"], json!("0"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = seeded().await;
        let err = store
            .insert(Collection::Fundraisers, json!({"id": "fund_1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_merge_and_delete() {
        let store = seeded().await;
        let patch = json!({"title": "Spring drive"}).as_object().cloned().unwrap();
        store.merge(Collection::Fundraisers, "fund_1", patch).await.unwrap();
        let fund = store.get(Collection::Fundraisers, "fund_1").await.unwrap().unwrap();
        assert_eq!(fund["title"], "Spring drive");

        store.delete(Collection::Fundraisers, "fund_1").await.unwrap();
        assert!(store.list(Collection::Fundraisers).await.unwrap().is_empty());
    }
}
