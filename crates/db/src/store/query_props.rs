//! Property-based tests for document queries.
//!
//! - `Eq` and `Ne` partition every collection
//! - `Lt` and `Gte` partition numeric fields

use proptest::prelude::*;
use serde_json::{Value, json};

use super::Document;
use super::query::{FilterOp, Query};

fn document() -> impl Strategy<Value = Document> {
    (0u32..1000, prop::option::of(-500i64..500), "[ab]@x\\.com").prop_map(|(id, amount, owner)| {
        let mut doc = json!({ "id": format!("doc_{id}"), "owner": owner });
        if let Some(amount) = amount {
            doc["amount"] = Value::String(amount.to_string());
        }
        doc
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every document matches exactly one of `Eq` and `Ne` for the same value.
    #[test]
    fn prop_eq_ne_partition(docs in prop::collection::vec(document(), 0..30)) {
        let eq = Query::all().eq("owner", "a@x.com").apply(docs.clone());
        let ne = Query::all().filter("owner", FilterOp::Ne, "a@x.com").apply(docs.clone());
        prop_assert_eq!(eq.len() + ne.len(), docs.len());
    }

    /// Documents with an amount match exactly one of `Lt` and `Gte`.
    #[test]
    fn prop_lt_gte_partition(
        docs in prop::collection::vec(document(), 0..30),
        pivot in -500i64..500,
    ) {
        let with_amount = docs.iter().filter(|d| d.get("amount").is_some()).count();
        let lt = Query::all().filter("amount", FilterOp::Lt, pivot).apply(docs.clone());
        let gte = Query::all().filter("amount", FilterOp::Gte, pivot).apply(docs);
        prop_assert_eq!(lt.len() + gte.len(), with_amount);
    }
}
