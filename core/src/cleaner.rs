//! The cleaning transformation.
//!
//! Pure and deterministic: a [`SpreadsheetTable`] in, a normalized
//! [`SpreadsheetTable`] out, no I/O. The first column is the *anchor* — it
//! is assumed to be an already-normalized key (a date or an identifier) and
//! the heuristics below are too aggressive to risk applying to it, so its
//! values pass through verbatim.
//!
//! Steps, applied to the remaining columns only:
//!
//! 1. trim column names
//! 2. drop columns that are null in every row
//! 3. drop rows that are null across every remaining column
//! 4. trim surrounding whitespace from text cells
//! 5. forward-fill nulls from the nearest preceding value in the column
//!
//! When step 3 drops rows, the same row indices are dropped from the anchor
//! column as well, keeping anchor values aligned with the rows they belong
//! to. The table invariant (equal row count in every column) could not hold
//! otherwise.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::table::{Cell, Column, SpreadsheetTable};

/// Normalize a table.
///
/// Total over well-formed input; the only failure mode is structural
/// (a table that cannot remain rectangular, which the [`SpreadsheetTable`]
/// constructor rules out up front).
pub fn clean(table: SpreadsheetTable) -> Result<SpreadsheetTable> {
    let mut columns = table.into_columns();

    for column in &mut columns {
        column.name = column.name.trim().to_string();
    }

    let mut iter = columns.into_iter();
    // The constructor guarantees at least one column.
    let Some(mut anchor) = iter.next() else {
        return SpreadsheetTable::new(vec![]);
    };

    // Drop columns that are empty in every row.
    let mut rest: Vec<Column> = iter.filter(|c| !c.is_all_null()).collect();

    // Drop rows that are empty across every remaining column, from the
    // anchor as well so row n still describes row n.
    let dropped = all_null_rows(&rest);
    if !dropped.is_empty() {
        drop_rows(&mut anchor, &dropped);
        for column in &mut rest {
            drop_rows(column, &dropped);
        }
    }

    for column in &mut rest {
        trim_text_cells(column);
        forward_fill(column);
    }

    let mut cleaned = Vec::with_capacity(1 + rest.len());
    cleaned.push(anchor);
    cleaned.extend(rest);
    SpreadsheetTable::new(cleaned)
}

/// Row indices at which every given column is null.
///
/// With no columns there is nothing to judge emptiness by, so no rows are
/// reported.
fn all_null_rows(columns: &[Column]) -> BTreeSet<usize> {
    let Some(first) = columns.first() else {
        return BTreeSet::new();
    };

    (0..first.cells.len())
        .filter(|&row| columns.iter().all(|c| c.cells[row].is_null()))
        .collect()
}

fn drop_rows(column: &mut Column, dropped: &BTreeSet<usize>) {
    let mut row = 0;
    column.cells.retain(|_| {
        let keep = !dropped.contains(&row);
        row += 1;
        keep
    });
}

fn trim_text_cells(column: &mut Column) {
    for cell in &mut column.cells {
        if let Cell::Text(s) = cell {
            *cell = Cell::Text(s.trim().to_string());
        }
    }
}

/// Replace each null with the nearest preceding non-null value in the same
/// column. Leading nulls have no predecessor and stay null.
fn forward_fill(column: &mut Column) {
    let mut last: Option<Cell> = None;
    for cell in &mut column.cells {
        if cell.is_null() {
            if let Some(ref value) = last {
                *cell = value.clone();
            }
        } else {
            last = Some(cell.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn table(columns: Vec<Column>) -> SpreadsheetTable {
        SpreadsheetTable::new(columns).unwrap()
    }

    #[test]
    fn test_column_names_are_trimmed() {
        let cleaned = clean(table(vec![
            Column::new("  fecha ", vec![text("a")]),
            Column::new(" total", vec![Cell::Number(1.0)]),
        ]))
        .unwrap();

        assert_eq!(cleaned.columns()[0].name, "fecha");
        assert_eq!(cleaned.columns()[1].name, "total");
    }

    #[test]
    fn test_all_null_column_is_dropped() {
        let cleaned = clean(table(vec![
            Column::new("fecha", vec![text("a"), text("b")]),
            Column::new("vacia", vec![Cell::Null, Cell::Null]),
            Column::new("total", vec![Cell::Number(1.0), Cell::Number(2.0)]),
        ]))
        .unwrap();

        assert_eq!(cleaned.column_count(), 2);
        assert_eq!(cleaned.columns()[1].name, "total");
    }

    #[test]
    fn test_anchor_is_never_dropped_or_modified() {
        // An all-null anchor survives untouched, and its cells are not
        // trimmed or filled.
        let cleaned = clean(table(vec![
            Column::new("clave", vec![text("  k1  "), Cell::Null]),
            Column::new("total", vec![Cell::Number(1.0), Cell::Number(2.0)]),
        ]))
        .unwrap();

        assert_eq!(
            cleaned.columns()[0].cells,
            vec![text("  k1  "), Cell::Null]
        );
    }

    #[test]
    fn test_anchor_invariance_when_no_rows_drop() {
        let anchor = Column::new("fecha", vec![text("2024-01"), text("2024-02")]);
        let cleaned = clean(table(vec![
            anchor.clone(),
            Column::new("total", vec![Cell::Number(1.0), Cell::Null]),
        ]))
        .unwrap();

        assert_eq!(cleaned.columns()[0], anchor);
    }

    #[test]
    fn test_drops_anchor_rows_in_lockstep() {
        // The reference implementation kept the anchor at full length and
        // misaligned it against the shortened rest; here the same row
        // indices are dropped from the anchor so values stay paired.
        let cleaned = clean(table(vec![
            Column::new("fecha", vec![text("d1"), text("d2"), text("d3")]),
            Column::new("a", vec![Cell::Number(1.0), Cell::Null, Cell::Number(3.0)]),
            Column::new("b", vec![text("x"), Cell::Null, text("z")]),
        ]))
        .unwrap();

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.columns()[0].cells, vec![text("d1"), text("d3")]);
        assert_eq!(
            cleaned.columns()[1].cells,
            vec![Cell::Number(1.0), Cell::Number(3.0)]
        );
    }

    #[test]
    fn test_forward_fill() {
        let cleaned = clean(table(vec![
            Column::new("k", vec![text("a"), text("b"), text("c"), text("d")]),
            Column::new(
                "v",
                vec![
                    Cell::Number(1.0),
                    Cell::Null,
                    Cell::Null,
                    Cell::Number(3.0),
                ],
            ),
        ]))
        .unwrap();

        assert_eq!(
            cleaned.columns()[1].cells,
            vec![
                Cell::Number(1.0),
                Cell::Number(1.0),
                Cell::Number(1.0),
                Cell::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_forward_fill_leading_null_stays_null() {
        let cleaned = clean(table(vec![
            Column::new("k", vec![text("a"), text("b")]),
            Column::new("v", vec![Cell::Null, Cell::Number(2.0)]),
            Column::new("w", vec![Cell::Number(9.0), Cell::Null]),
        ]))
        .unwrap();

        assert_eq!(
            cleaned.columns()[1].cells,
            vec![Cell::Null, Cell::Number(2.0)]
        );
    }

    #[test]
    fn test_text_cells_trimmed_numbers_untouched() {
        let cleaned = clean(table(vec![
            Column::new("k", vec![text("a"), text("b")]),
            Column::new("v", vec![text("  abc  "), Cell::Number(4.0)]),
        ]))
        .unwrap();

        assert_eq!(
            cleaned.columns()[1].cells,
            vec![text("abc"), Cell::Number(4.0)]
        );
    }

    #[test]
    fn test_whitespace_only_cell_is_not_filled() {
        // "   " is text, not null: it trims to "" and blocks nothing.
        let cleaned = clean(table(vec![
            Column::new("k", vec![text("a"), text("b"), text("c")]),
            Column::new("v", vec![Cell::Number(1.0), text("   "), Cell::Null]),
        ]))
        .unwrap();

        assert_eq!(
            cleaned.columns()[1].cells,
            vec![Cell::Number(1.0), text(""), text("")]
        );
    }

    #[test]
    fn test_anchor_only_table_passes_through() {
        let cleaned = clean(table(vec![Column::new(
            "fecha",
            vec![text("d1"), Cell::Null],
        )]))
        .unwrap();

        assert_eq!(cleaned.column_count(), 1);
        assert_eq!(cleaned.row_count(), 2);
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let input = table(vec![
            Column::new("fecha", vec![text("d1"), text("d2")]),
            Column::new("total", vec![Cell::Number(1.0), Cell::Number(2.0)]),
            Column::new("nota", vec![text("ok"), text("alta")]),
        ]);

        let once = clean(input).unwrap();
        let twice = clean(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
