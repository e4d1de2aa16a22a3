//! In-memory model of a spreadsheet table.

use chrono::NaiveDateTime;

use crate::error::{JanitorError, Result};

/// A single cell value.
///
/// The closed sum keeps the text-only cleaning steps statically checkable:
/// whitespace trimming applies to [`Cell::Text`] and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text content.
    Text(String),

    /// Numeric content; integers are widened to `f64` on load.
    Number(f64),

    /// Date or datetime content.
    Date(NaiveDateTime),

    /// Empty cell.
    Null,
}

impl Cell {
    /// Whether the cell is empty.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Trim surrounding whitespace if this is a text cell.
    ///
    /// Non-text cells are returned unchanged. A whitespace-only text cell
    /// trims to the empty string; it does not become [`Cell::Null`].
    pub fn trimmed(self) -> Cell {
        match self {
            Cell::Text(s) => Cell::Text(s.trim().to_string()),
            other => other,
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name. Trimmed on load; unique within a table.
    pub name: String,

    /// Cell values, one per row.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create a column from a name and its cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Whether every cell in the column is null.
    pub fn is_all_null(&self) -> bool {
        self.cells.iter().all(Cell::is_null)
    }
}

/// An ordered collection of equally-sized columns.
///
/// The equal-row-count invariant holds at all times: construction rejects
/// ragged input, and every transformation in [`crate::cleaner`] preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetTable {
    columns: Vec<Column>,
}

impl SpreadsheetTable {
    /// Build a table, validating rectangularity.
    ///
    /// Fails with [`JanitorError::Structural`] when there are no columns or
    /// the columns disagree on row count. A zero-row table is valid.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(JanitorError::Structural(
                "table has no columns".to_string(),
            ));
        };

        let rows = first.cells.len();
        for column in &columns {
            if column.cells.len() != rows {
                return Err(JanitorError::Structural(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name,
                    column.cells.len(),
                    rows
                )));
            }
        }

        Ok(Self { columns })
    }

    /// The columns, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Consume the table, yielding its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
