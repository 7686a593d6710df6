//! Write operations and atomic batches.

use leadflow_core::model::{Collection, Record};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::{Document, StoreError};

/// One write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Adds a new document; its id must be unused.
    Insert {
        /// Target collection.
        collection: Collection,
        /// Full document with `id`.
        document: Document,
    },
    /// Overwrites an existing document.
    Replace {
        /// Target collection.
        collection: Collection,
        /// Full document with `id`.
        document: Document,
    },
    /// Sets the given top-level fields of an existing document; `null`
    /// removes a field.
    Merge {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Fields to set.
        patch: Map<String, Value>,
    },
    /// Removes a document; removing a missing id does nothing.
    Delete {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
    },
    /// Adds `delta` to a numeric field of an existing document.
    Increment {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: String,
        /// Field to change; missing counts as zero.
        field: String,
        /// Amount added.
        delta: Decimal,
    },
}

impl WriteOp {
    /// Collection the operation writes to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Insert { collection, .. }
            | Self::Replace { collection, .. }
            | Self::Merge { collection, .. }
            | Self::Delete { collection, .. }
            | Self::Increment { collection, .. } => *collection,
        }
    }
}

/// Writes applied all together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation.
    #[must_use]
    pub fn push(mut self, op: WriteOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Adds an insert of a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the record cannot be encoded.
    pub fn insert<T: Record>(self, record: &T) -> Result<Self, StoreError> {
        Ok(self.push(WriteOp::Insert {
            collection: T::COLLECTION,
            document: to_document(record)?,
        }))
    }

    /// Adds a replace of a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the record cannot be encoded.
    pub fn replace<T: Record>(self, record: &T) -> Result<Self, StoreError> {
        Ok(self.push(WriteOp::Replace {
            collection: T::COLLECTION,
            document: to_document(record)?,
        }))
    }

    /// Adds a merge of top-level fields.
    #[must_use]
    pub fn merge(self, collection: Collection, id: &str, patch: Map<String, Value>) -> Self {
        self.push(WriteOp::Merge {
            collection,
            id: id.to_string(),
            patch,
        })
    }

    /// Adds a delete.
    #[must_use]
    pub fn delete(self, collection: Collection, id: &str) -> Self {
        self.push(WriteOp::Delete {
            collection,
            id: id.to_string(),
        })
    }

    /// Adds an increment.
    #[must_use]
    pub fn increment(self, collection: Collection, id: &str, field: &str, delta: Decimal) -> Self {
        self.push(WriteOp::Increment {
            collection,
            id: id.to_string(),
            field: field.to_string(),
            delta,
        })
    }

    /// The operations, in order.
    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Returns true if the batch has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Encodes a record as a document.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the record cannot be encoded.
pub fn to_document<T: Record>(record: &T) -> Result<Document, StoreError> {
    Ok(serde_json::to_value(record)?)
}

/// Decodes a document into a record.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the document does not match the record type.
pub fn from_document<T: Record>(document: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(document)?)
}

/// The `id` of a document.
///
/// # Errors
///
/// Returns `StoreError::InvalidDocument` unless the document is an object
/// with a non-empty string `id`.
pub fn document_id(collection: Collection, document: &Document) -> Result<&str, StoreError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::InvalidDocument {
            collection,
            reason: "missing string id".to_string(),
        })
}
