//! Document store backed by `PostgreSQL` through `SeaORM`.
//!
//! Each batch runs in one database transaction. Rows touched by merges and
//! increments are locked with `SELECT ... FOR UPDATE`, so concurrent
//! increments from other processes are not lost. Change events are
//! process-local.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use leadflow_core::model::Collection;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tokio::sync::broadcast;
use tracing::debug;

use super::batch::{WriteBatch, WriteOp, document_id};
use super::staging::{increment_field, merge_fields};
use super::{ChangeEvent, ChangeFeed, Document, DocumentStore, StoreError};
use crate::entities::documents;

/// Stores every collection in the `crm_documents` table.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl PostgresStore {
    /// Creates a store over a migrated database.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            feed: ChangeFeed::new(),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn find_locked(
        txn: &DatabaseTransaction,
        collection: Collection,
        id: &str,
    ) -> Result<documents::Model, StoreError> {
        documents::Entity::find_by_id((collection.key().to_string(), id.to_string()))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })
    }

    async fn update_body(
        txn: &DatabaseTransaction,
        row: documents::Model,
        body: Document,
    ) -> Result<(), StoreError> {
        let mut active = row.into_active_model();
        active.body = Set(body);
        active.updated_at = Set(Utc::now().into());
        active.update(txn).await?;
        Ok(())
    }

    async fn apply(txn: &DatabaseTransaction, op: &WriteOp) -> Result<(), StoreError> {
        let collection = op.collection();
        match op {
            WriteOp::Insert { document, .. } => {
                let id = document_id(collection, document)?;
                let now = Utc::now().into();
                documents::ActiveModel {
                    collection: Set(collection.key().to_string()),
                    id: Set(id.to_string()),
                    body: Set(document.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await
                .map_err(|err| write_error(collection, err))?;
            }
            WriteOp::Replace { document, .. } => {
                let id = document_id(collection, document)?;
                let row = Self::find_locked(txn, collection, id).await?;
                Self::update_body(txn, row, document.clone())
                    .await
                    .map_err(|err| store_write_error(collection, err))?;
            }
            WriteOp::Merge { id, patch, .. } => {
                let row = Self::find_locked(txn, collection, id).await?;
                let mut body = row.body.clone();
                merge_fields(collection, &mut body, patch)?;
                Self::update_body(txn, row, body)
                    .await
                    .map_err(|err| store_write_error(collection, err))?;
            }
            WriteOp::Delete { id, .. } => {
                documents::Entity::delete_by_id((collection.key().to_string(), id.clone()))
                    .exec(txn)
                    .await?;
            }
            WriteOp::Increment {
                id, field, delta, ..
            } => {
                let row = Self::find_locked(txn, collection, id).await?;
                let mut body = row.body.clone();
                increment_field(collection, &mut body, field, *delta)?;
                Self::update_body(txn, row, body).await?;
            }
        }
        Ok(())
    }
}

/// Maps unique-index violations to `StoreError::Conflict`.
fn write_error(collection: Collection, err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict { collection, detail },
        _ => StoreError::Database(err),
    }
}

fn store_write_error(collection: Collection, err: StoreError) -> StoreError {
    match err {
        StoreError::Database(db_err) => write_error(collection, db_err),
        other => other,
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = documents::Entity::find()
            .filter(documents::Column::Collection.eq(collection.key()))
            .order_by_asc(documents::Column::CreatedAt)
            .order_by_asc(documents::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|row| row.body).collect())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let row = documents::Entity::find_by_id((collection.key().to_string(), id.to_string()))
            .one(&self.db)
            .await?;
        Ok(row.map(|row| row.body))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for op in batch.ops() {
            // Dropping the transaction on error rolls it back.
            Self::apply(&txn, op).await?;
        }
        txn.commit().await?;

        let touched: BTreeSet<Collection> = batch.ops().iter().map(WriteOp::collection).collect();
        debug!(ops = batch.len(), ?touched, "Committed batch");
        self.feed.publish(touched);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe()
    }
}
