//! Persistence errors.

use leadflow_core::model::Collection;
use leadflow_shared::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted record does not exist.
    #[error("{collection} record {id} not found")]
    NotFound {
        /// Collection searched.
        collection: Collection,
        /// Missing id.
        id: String,
    },

    /// The write would break a uniqueness rule.
    #[error("{collection}: {detail}")]
    Conflict {
        /// Collection written.
        collection: Collection,
        /// What collided.
        detail: String,
    },

    /// A document is not a JSON object with a string `id`.
    #[error("Invalid document in {collection}: {reason}")]
    InvalidDocument {
        /// Collection of the document.
        collection: Collection,
        /// What is wrong with it.
        reason: String,
    },

    /// A record could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The local data file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage configuration cannot be used.
    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            StoreError::InvalidDocument { .. }
            | StoreError::Serialization(_)
            | StoreError::Io(_)
            | StoreError::Misconfigured(_)
            | StoreError::Database(_) => Self::Storage(err.to_string()),
        }
    }
}
