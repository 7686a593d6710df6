//! Document stores.
//!
//! Every collection is a list of JSON objects keyed by their `id` field.
//! Writes go through `WriteBatch`, which a store applies atomically before
//! publishing one `ChangeEvent`.
//!
//! # Modules
//!
//! - `batch` - Write operations and batches
//! - `changes` - Change feed
//! - `live` - Re-evaluating queries and subscriptions
//! - `local` - JSON file store
//! - `memory` - In-process store
//! - `postgres` - `SeaORM`-backed store
//! - `query` - Field filters

pub mod batch;
pub mod changes;
pub mod error;
pub mod live;
pub mod local;
pub mod memory;
pub mod postgres;
pub mod query;

mod staging;

#[cfg(test)]
mod query_props;

use async_trait::async_trait;
use leadflow_core::model::Collection;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

pub use batch::{WriteBatch, WriteOp};
pub use changes::{ChangeEvent, ChangeFeed};
pub use error::StoreError;
pub use live::{LiveQuery, Subscription};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use query::{Filter, FilterOp, Query};

/// A stored record as JSON.
pub type Document = Value;

/// Persistence for the CRM collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of a collection, oldest first.
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// One document by id.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    /// Documents matching a query.
    async fn query(&self, collection: Collection, query: &Query) -> Result<Vec<Document>, StoreError> {
        Ok(query.apply(self.list(collection).await?))
    }

    /// Applies every operation of the batch, or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Receives an event after each committed batch.
    fn changes(&self) -> broadcast::Receiver<ChangeEvent>;

    /// Inserts one document.
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().push(WriteOp::Insert { collection, document }))
            .await
    }

    /// Sets top-level fields of one document.
    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().push(WriteOp::Merge {
            collection,
            id: id.to_string(),
            patch,
        }))
        .await
    }

    /// Deletes one document.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().delete(collection, id)).await
    }

    /// Adds `delta` to a numeric field of one document.
    async fn increment(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        delta: Decimal,
    ) -> Result<(), StoreError> {
        self.commit(WriteBatch::new().increment(collection, id, field, delta))
            .await
    }
}
