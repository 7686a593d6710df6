//! Generic repository for one record type.

use std::marker::PhantomData;
use std::sync::Arc;

use leadflow_core::model::Record;
use tracing::warn;

use crate::store::batch::{from_document, to_document};
use crate::store::{DocumentStore, LiveQuery, Query, StoreError, WriteBatch};

/// Reads and writes records of type `T` in their collection.
pub struct Repository<T: Record> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.store))
    }
}

impl<T: Record> Repository<T> {
    /// Creates a repository over a store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Every record, oldest first.
    ///
    /// Documents that do not decode are skipped with a warning.
    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        let documents = self.store.list(T::COLLECTION).await?;
        Ok(decode_all(documents))
    }

    /// Records matching a query.
    pub async fn query(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let documents = self.store.query(T::COLLECTION, query).await?;
        Ok(decode_all(documents))
    }

    /// One record by id.
    pub async fn find(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Stores a new record.
    pub async fn insert(&self, record: &T) -> Result<(), StoreError> {
        self.store.insert(T::COLLECTION, to_document(record)?).await
    }

    /// Overwrites an existing record.
    pub async fn replace(&self, record: &T) -> Result<(), StoreError> {
        self.store.commit(WriteBatch::new().replace(record)?).await
    }

    /// Deletes a record; deleting a missing id does nothing.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(T::COLLECTION, id).await
    }

    /// Follows a query over this collection.
    #[must_use]
    pub fn live(&self, query: Query) -> LiveQuery {
        LiveQuery::new(Arc::clone(&self.store), T::COLLECTION, query)
    }
}

fn decode_all<T: Record>(documents: Vec<serde_json::Value>) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            match from_document::<T>(document) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(collection = %T::COLLECTION, %id, error = %err, "Skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use leadflow_core::model::{Campaign, Collection};
    use leadflow_shared::types::CampaignId;
    use serde_json::json;

    fn campaign(id: &str, product: &str) -> Campaign {
        Campaign {
            id: CampaignId::from(id),
            organisation: "Helping Hands".into(),
            product: product.into(),
        }
    }

    #[tokio::test]
    async fn test_insert_find_replace() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let repo = Repository::<Campaign>::new(store);

        repo.insert(&campaign("camp_1", "Meals")).await.unwrap();
        repo.replace(&campaign("camp_1", "Books")).await.unwrap();

        let found = repo.find("camp_1").await.unwrap().unwrap();
        assert_eq!(found.product, "Books");
        assert!(repo.find("camp_2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_skips_undecodable_documents() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        store
            .insert(Collection::Campaigns, json!({"id": "camp_bad"}))
            .await
            .unwrap();
        let repo = Repository::<Campaign>::new(Arc::clone(&store));
        repo.insert(&campaign("camp_1", "Meals")).await.unwrap();

        let all = repo.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_str(), "camp_1");
    }
}
