//! Filter, sort and paginate.

use std::cmp::Ordering;

use leadflow_shared::types::PageResponse;

use super::field::{FieldValue, Tabular};
use super::state::{SortDirection, TableState};

/// Keeps rows where any registered field contains `search`, case-insensitively.
///
/// An empty search keeps every row.
#[must_use]
pub fn apply_filter<R: Tabular>(rows: Vec<R>, search: &str) -> Vec<R> {
    if search.is_empty() {
        return rows;
    }
    let needle = search.to_lowercase();
    rows.into_iter().filter(|row| matches(row, &needle)).collect()
}

fn matches<R: Tabular>(row: &R, needle: &str) -> bool {
    R::fields().iter().any(|field| {
        (field.get)(row)
            .search_text()
            .is_some_and(|text| text.contains(needle))
    })
}

/// Stable sort by a registered field. Missing values go last in both
/// directions; an unknown field leaves the order unchanged.
pub fn apply_sort<R: Tabular>(rows: &mut [R], field: &str, direction: SortDirection) {
    let Some(spec) = R::field(field) else {
        return;
    };
    rows.sort_by(|a, b| compare(&(spec.get)(a), &(spec.get)(b), direction));
}

fn compare(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
    }
}

/// Sorting the current field flips its direction; a new field starts descending.
pub fn toggle_sort(state: &mut TableState, field: &str) {
    if state.sort_field == field {
        state.sort_direction = state.sort_direction.flipped();
    } else {
        state.sort_field = field.to_string();
        state.sort_direction = SortDirection::Desc;
    }
}

/// Rows of the state's page.
#[must_use]
pub fn paginate<'a, R>(rows: &'a [R], state: &TableState) -> &'a [R] {
    state.page_request().slice(rows)
}

/// Filter, sort, then paginate.
#[must_use]
pub fn process<R: Tabular>(rows: Vec<R>, state: &TableState) -> PageResponse<R> {
    let mut rows = apply_filter(rows, &state.search);
    apply_sort(&mut rows, &state.sort_field, state.sort_direction);

    let total = rows.len() as u64;
    let request = state.page_request();
    let data = rows
        .into_iter()
        .skip(request.offset())
        .take(request.limit())
        .collect();

    PageResponse::new(data, state.page, state.per_page, total)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::table::field::{FieldKind, FieldSpec};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Minimal row used by the engine tests.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Row {
        pub name: String,
        pub note: Option<String>,
        pub amount: Decimal,
    }

    impl Tabular for Row {
        fn fields() -> &'static [FieldSpec<Self>] {
            const FIELDS: &[FieldSpec<Row>] = &[
                FieldSpec {
                    name: "name",
                    kind: FieldKind::Text,
                    get: |r| FieldValue::from(r.name.as_str()),
                },
                FieldSpec {
                    name: "note",
                    kind: FieldKind::Text,
                    get: |r| FieldValue::text(r.note.as_deref()),
                },
                FieldSpec {
                    name: "amount",
                    kind: FieldKind::Number,
                    get: |r| FieldValue::from(r.amount),
                },
            ];
            FIELDS
        }
    }

    fn row(name: &str, note: Option<&str>, amount: Decimal) -> Row {
        Row {
            name: name.into(),
            note: note.map(Into::into),
            amount,
        }
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_filter_matches_any_field() {
        let rows = vec![
            row("Asha", None, dec!(10)),
            row("Bala", Some("met ASHA's friend"), dec!(20)),
            row("Chitra", None, dec!(250)),
        ];

        assert_eq!(names(&apply_filter(rows.clone(), "asha")), vec!["Asha", "Bala"]);
        assert_eq!(names(&apply_filter(rows.clone(), "25")), vec!["Chitra"]);
        assert_eq!(apply_filter(rows, "").len(), 3);
    }

    #[test]
    fn test_sort_missing_values_last_both_ways() {
        let mut rows = vec![
            row("a", None, dec!(1)),
            row("b", Some("beta"), dec!(2)),
            row("c", Some("Alpha"), dec!(3)),
        ];

        apply_sort(&mut rows, "note", SortDirection::Asc);
        assert_eq!(names(&rows), vec!["c", "b", "a"]);

        apply_sort(&mut rows, "note", SortDirection::Desc);
        assert_eq!(names(&rows), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_numeric_and_stable() {
        let mut rows = vec![
            row("first", None, dec!(10)),
            row("second", None, dec!(9)),
            row("third", None, dec!(10)),
        ];

        apply_sort(&mut rows, "amount", SortDirection::Desc);
        assert_eq!(names(&rows), vec!["first", "third", "second"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let mut rows = vec![row("b", None, dec!(1)), row("a", None, dec!(2))];
        apply_sort(&mut rows, "nope", SortDirection::Asc);
        assert_eq!(names(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = TableState::new("createdAt", SortDirection::Desc, 10);

        toggle_sort(&mut state, "createdAt");
        assert_eq!(state.sort_direction, SortDirection::Asc);

        toggle_sort(&mut state, "name");
        assert_eq!(state.sort_field, "name");
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_process_pages_after_filter_and_sort() {
        let rows: Vec<Row> = (1..=25)
            .map(|n| row(&format!("lead {n}"), None, Decimal::from(n)))
            .collect();
        let mut state = TableState::new("amount", SortDirection::Desc, 10);
        state.page = 3;

        let page = process(rows, &state);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(names(&page.data), vec!["lead 5", "lead 4", "lead 3", "lead 2", "lead 1"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let rows = vec![row("a", None, dec!(1))];
        let mut state = TableState::new("name", SortDirection::Asc, 10);
        state.page = 2;

        assert!(paginate(&rows, &state).is_empty());
        assert!(process(rows, &state).data.is_empty());
    }
}
