//! Field filters over documents.
//!
//! Values compare as decimals when both sides parse as one (numbers or
//! numeric strings, since amounts are stored as strings), otherwise as
//! strings. Timestamps are stored as RFC 3339 and compare as strings.

use std::cmp::Ordering;
use std::str::FromStr;

use leadflow_core::table::SortDirection;
use rust_decimal::Decimal;
use serde_json::Value;

use super::Document;

/// Comparison of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

/// One field condition. A missing field reads as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Top-level field name.
    pub field: String,
    /// Comparison.
    pub op: FilterOp,
    /// Value compared against.
    pub value: Value,
}

impl Filter {
    /// Returns true if the document satisfies the condition.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        let actual = document.get(&self.field).unwrap_or(&Value::Null);
        let ordering = compare_values(actual, &self.value);
        match self.op {
            FilterOp::Eq => ordering == Some(Ordering::Equal),
            FilterOp::Ne => ordering != Some(Ordering::Equal),
            FilterOp::Lt => ordering == Some(Ordering::Less),
            FilterOp::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Gt => ordering == Some(Ordering::Greater),
            FilterOp::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

/// Filters, order and limit over one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Conditions, all of which must hold.
    pub filters: Vec<Filter>,
    /// Field and direction to order by; store order otherwise.
    pub order_by: Option<(String, SortDirection)>,
    /// Maximum number of documents.
    pub limit: Option<usize>,
}

impl Query {
    /// Matches every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a condition.
    #[must_use]
    pub fn filter(mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    /// Shorthand for an equality condition.
    #[must_use]
    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Eq, value)
    }

    /// Orders the result.
    #[must_use]
    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    /// Caps the result size.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if every condition holds.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(document))
    }

    /// Runs the query over documents in store order.
    #[must_use]
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut selected: Vec<Document> = documents.into_iter().filter(|d| self.matches(d)).collect();

        if let Some((field, direction)) = &self.order_by {
            selected.sort_by(|a, b| {
                let a = a.get(field).unwrap_or(&Value::Null);
                let b = b.get(field).unwrap_or(&Value::Null);
                let ordering = compare_values(a, b).unwrap_or(Ordering::Equal);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Reads a decimal from a JSON number or numeric string.
#[must_use]
pub fn decimal_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Orders two JSON values; `None` when they are not comparable.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (decimal_value(a), decimal_value(b)) {
        return Some(a.cmp(&b));
    }
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            (a == b).then_some(Ordering::Equal)
        }
        _ => None,
    }
}
