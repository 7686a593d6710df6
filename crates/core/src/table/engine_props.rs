//! Property-based tests for the table engine.
//!
//! - Filter keeps a row iff some field contains the search text
//! - Toggling the same field twice restores the direction
//! - Concatenated pages rebuild the sorted, filtered list

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::tests::Row;
use super::engine::{apply_filter, apply_sort, paginate, toggle_sort};
use super::field::Tabular;
use super::state::{SortDirection, TableState};

fn row() -> impl Strategy<Value = Row> {
    (
        "[A-Za-z ]{0,10}",
        prop::option::of("[a-z]{0,6}"),
        0i64..100_000,
    )
        .prop_map(|(name, note, cents)| Row {
            name,
            note,
            amount: Decimal::new(cents, 2),
        })
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A row survives the filter iff one of its fields contains the search text.
    #[test]
    fn prop_filter_keeps_exactly_matching_rows(
        rows in prop::collection::vec(row(), 0..30),
        search in "[a-zA-Z0-9]{0,3}",
    ) {
        let kept = apply_filter(rows.clone(), &search);
        let needle = search.to_lowercase();
        let expected: Vec<Row> = rows
            .into_iter()
            .filter(|r| {
                search.is_empty()
                    || Row::fields().iter().any(|f| {
                        (f.get)(r).search_text().is_some_and(|t| t.contains(&needle))
                    })
            })
            .collect();

        prop_assert_eq!(kept, expected);
    }

    /// Toggling the sorted field twice returns to the starting direction.
    #[test]
    fn prop_toggle_twice_is_identity(start in direction()) {
        let mut state = TableState::new("name", start, 10);
        toggle_sort(&mut state, "name");
        prop_assert_eq!(state.sort_direction, start.flipped());
        toggle_sort(&mut state, "name");
        prop_assert_eq!(state.sort_direction, start);
    }

    /// A different field always starts descending.
    #[test]
    fn prop_toggle_new_field_starts_descending(start in direction()) {
        let mut state = TableState::new("name", start, 10);
        toggle_sort(&mut state, "amount");
        prop_assert_eq!(state.sort_field.as_str(), "amount");
        prop_assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    /// Pages 1..=n concatenated equal the full sorted list.
    #[test]
    fn prop_pages_rebuild_sorted_list(
        rows in prop::collection::vec(row(), 0..60),
        per_page in 1u32..15,
        dir in direction(),
    ) {
        let mut sorted = rows;
        apply_sort(&mut sorted, "amount", dir);

        let mut state = TableState::new("amount", dir, per_page);
        let pages = sorted.len().div_ceil(per_page as usize).max(1);
        let mut rebuilt = Vec::new();
        for page in 1..=pages {
            state.page = u32::try_from(page).unwrap();
            rebuilt.extend_from_slice(paginate(&sorted, &state));
        }

        prop_assert_eq!(rebuilt, sorted);
    }
}
