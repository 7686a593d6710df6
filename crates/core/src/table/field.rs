//! Field registry.
//!
//! Each row type lists its fields once; search and sort read values only
//! through that list.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

/// How a field's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Case-insensitive string comparison.
    Text,
    /// Numeric comparison.
    Number,
    /// Chronological comparison.
    Timestamp,
}

/// A field value read from a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string.
    Text(String),
    /// A decimal number.
    Number(Decimal),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// No value.
    Missing,
}

impl FieldValue {
    /// Text value, `Missing` for `None`.
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, |v| Self::Text(v.to_string()))
    }

    /// Returns true for [`FieldValue::Missing`].
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Lower-cased string form used by search; `None` when missing.
    #[must_use]
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.to_lowercase()),
            Self::Number(n) => Some(n.normalize().to_string()),
            Self::Timestamp(t) => Some(
                t.to_rfc3339_opts(SecondsFormat::Millis, true)
                    .to_lowercase(),
            ),
            Self::Missing => None,
        }
    }

    /// Compares two present values. Missing values are ordered by the caller.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            _ => self.search_text().cmp(&other.search_text()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// One registered field of a row type.
pub struct FieldSpec<R> {
    /// Field name as used in sort state.
    pub name: &'static str,
    /// Comparison kind.
    pub kind: FieldKind,
    /// Reads the value from a row.
    pub get: fn(&R) -> FieldValue,
}

impl<R> std::fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A row type the table engine can search and sort.
pub trait Tabular: Sized + 'static {
    /// Every searchable and sortable field.
    fn fields() -> &'static [FieldSpec<Self>];

    /// Looks up a field by name.
    fn field(name: &str) -> Option<&'static FieldSpec<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }
}
