//! Search, sort and pagination over joined rows.
//!
//! # Modules
//!
//! - `field` - Field registry: the searchable and sortable fields of a row type
//! - `state` - Per-table state and the default sort of each table
//! - `engine` - Filter, sort, toggle and paginate

pub mod engine;
pub mod field;
pub mod state;

#[cfg(test)]
mod engine_props;

pub use engine::{apply_filter, apply_sort, paginate, process, toggle_sort};
pub use field::{FieldKind, FieldSpec, FieldValue, Tabular};
pub use state::{SortDirection, TableKey, TableState, TableStates};
