//! Persistence layer for LeadFlow.
//!
//! This crate provides:
//! - The `DocumentStore` trait with memory, JSON file and Postgres backends
//! - Change notifications and live queries
//! - Typed repositories over any store
//! - `SeaORM` entities and migrations for the Postgres backend

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

pub use repositories::{CrmRepository, Repository};
pub use store::{DocumentStore, LocalStore, MemoryStore, PostgresStore, StoreError};

use leadflow_shared::config::{StorageBackend, StorageConfig};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Opens the configured store.
///
/// The Postgres backend runs pending migrations before use.
///
/// # Errors
///
/// Returns `StoreError::Misconfigured` if the Postgres backend has no
/// `database_url`, or the backend's error if it cannot be opened.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Local => {
            info!(path = %config.data_path.display(), "Using local file store");
            Ok(Arc::new(LocalStore::open(&config.data_path).await?))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| {
                    StoreError::Misconfigured("postgres backend requires database_url".to_string())
                })?;
            let db = connect(url, config.max_connections).await?;
            Migrator::up(&db, None).await?;
            info!(max_connections = config.max_connections, "Using postgres store");
            Ok(Arc::new(PostgresStore::new(db)))
        }
    }
}
