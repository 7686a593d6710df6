//! Applies a batch to an in-memory copy of the collections.
//!
//! Shared by the memory and file stores: the batch is staged against
//! copies of the touched collections and only swapped in once every
//! operation and uniqueness check has passed.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use leadflow_core::auth::normalize_email;
use leadflow_core::model::Collection;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::batch::{WriteBatch, WriteOp, document_id};
use super::query::decimal_value;
use super::{Document, StoreError};

/// Every collection's documents in insertion order.
pub(crate) type Collections = BTreeMap<Collection, Vec<Document>>;

/// New contents of the collections a batch touched.
#[derive(Debug, Default)]
pub(crate) struct Staged {
    pub(crate) collections: Collections,
}

impl Staged {
    pub(crate) fn touched(&self) -> BTreeSet<Collection> {
        self.collections.keys().copied().collect()
    }

    /// Moves the staged collections into `target`.
    pub(crate) fn apply_to(self, target: &mut Collections) {
        target.extend(self.collections);
    }
}

/// Stages `batch` against `current` without modifying it.
pub(crate) fn stage(current: &Collections, batch: &WriteBatch) -> Result<Staged, StoreError> {
    let mut staged = Staged::default();

    for op in batch.ops() {
        let collection = op.collection();
        let docs = staged
            .collections
            .entry(collection)
            .or_insert_with(|| current.get(&collection).cloned().unwrap_or_default());

        match op {
            WriteOp::Insert { document, .. } => {
                let id = document_id(collection, document)?;
                if position(docs, id).is_some() {
                    return Err(StoreError::Conflict {
                        collection,
                        detail: format!("id {id} already exists"),
                    });
                }
                docs.push(document.clone());
            }
            WriteOp::Replace { document, .. } => {
                let id = document_id(collection, document)?;
                let index = position(docs, id).ok_or_else(|| not_found(collection, id))?;
                docs[index] = document.clone();
            }
            WriteOp::Merge { id, patch, .. } => {
                let index = position(docs, id).ok_or_else(|| not_found(collection, id))?;
                merge_fields(collection, &mut docs[index], patch)?;
            }
            WriteOp::Delete { id, .. } => {
                docs.retain(|d| d.get("id").and_then(Value::as_str) != Some(id.as_str()));
            }
            WriteOp::Increment {
                id, field, delta, ..
            } => {
                let index = position(docs, id).ok_or_else(|| not_found(collection, id))?;
                increment_field(collection, &mut docs[index], field, *delta)?;
            }
        }
    }

    for (collection, docs) in &staged.collections {
        check_unique(*collection, docs)?;
    }
    Ok(staged)
}

/// Sets top-level fields of a document; a `null` value removes the field.
/// The id cannot change.
pub(crate) fn merge_fields(
    collection: Collection,
    document: &mut Document,
    patch: &Map<String, Value>,
) -> Result<(), StoreError> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| invalid(collection, "not an object"))?;
    if let Some(new_id) = patch.get("id")
        && object.get("id") != Some(new_id)
    {
        return Err(invalid(collection, "id cannot be changed"));
    }
    for (key, value) in patch {
        if value.is_null() {
            object.remove(key);
        } else {
            object.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

/// Adds `delta` to a numeric field, treating a missing field as zero.
///
/// The result is written in the decimal string form records use.
pub(crate) fn increment_field(
    collection: Collection,
    document: &mut Document,
    field: &str,
    delta: Decimal,
) -> Result<(), StoreError> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| invalid(collection, "not an object"))?;
    let current = match object.get(field) {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(value) => decimal_value(value)
            .ok_or_else(|| invalid(collection, &format!("{field} is not numeric")))?,
    };
    let updated = current
        .checked_add(delta)
        .ok_or_else(|| invalid(collection, &format!("{field} overflowed")))?;
    object.insert(field.to_string(), serde_json::to_value(updated)?);
    Ok(())
}

/// Enforces store-level unique keys.
///
/// - payments: non-empty `externalPaymentId`
/// - users: `email`, case-insensitively
pub(crate) fn check_unique(collection: Collection, docs: &[Document]) -> Result<(), StoreError> {
    let (field, normalize): (&str, fn(&str) -> String) = match collection {
        Collection::Payments => ("externalPaymentId", |v| v.trim().to_string()),
        Collection::Users => ("email", normalize_email),
        _ => return Ok(()),
    };

    let mut seen = HashSet::new();
    for doc in docs {
        let Some(raw) = doc.get(field).and_then(Value::as_str) else {
            continue;
        };
        let key = normalize(raw);
        if key.is_empty() {
            continue;
        }
        if !seen.insert(key.clone()) {
            return Err(StoreError::Conflict {
                collection,
                detail: format!("duplicate {field} {key}"),
            });
        }
    }
    Ok(())
}

fn position(docs: &[Document], id: &str) -> Option<usize> {
    docs.iter()
        .position(|d| d.get("id").and_then(Value::as_str) == Some(id))
}

fn not_found(collection: Collection, id: &str) -> StoreError {
    StoreError::NotFound {
        collection,
        id: id.to_string(),
    }
}

fn invalid(collection: Collection, reason: &str) -> StoreError {
    StoreError::InvalidDocument {
        collection,
        reason: reason.to_string(),
    }
}
