//! Spreadsheet file I/O.
//!
//! Loading goes through `calamine` (first worksheet, first row as headers),
//! saving through `rust_xlsxwriter`. Both directions map between the file's
//! cell representation and the [`Cell`] sum type; booleans have no variant
//! of their own and load as text, formula-error cells load as null.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::{JanitorError, Result};
use crate::table::{Cell, Column, SpreadsheetTable};

/// Load the first worksheet of an xlsx file into a table.
///
/// The first row supplies the column names (trimmed; blanks become
/// `Unnamed: N`, duplicates get a `.N` suffix). Fails when the file cannot
/// be opened, has no worksheet, or the sheet is empty.
pub fn load(path: &Path) -> Result<SpreadsheetTable> {
    let load_err = |message: String| JanitorError::Load {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| load_err(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_err("workbook has no worksheet".to_string()))?
        .map_err(|e| load_err(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(JanitorError::Structural(format!(
            "{}: sheet is empty",
            path.display()
        )));
    };

    let names = unique_names(
        header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(cell, i))
            .collect(),
    );

    let mut columns: Vec<Column> = names
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            let data = row.get(i).unwrap_or(&Data::Empty);
            column.cells.push(to_cell(data));
        }
    }

    debug!(
        path = %path.display(),
        columns = columns.len(),
        "loaded spreadsheet"
    );

    SpreadsheetTable::new(columns)
}

/// Write a table as an xlsx file, overwriting any existing file at `path`.
pub fn save(table: &SpreadsheetTable, path: &Path) -> Result<()> {
    write_workbook(table, path).map_err(|e| JanitorError::Save {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_workbook(
    table: &SpreadsheetTable,
    path: &Path,
) -> std::result::Result<(), rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (i, column) in table.columns().iter().enumerate() {
        let col = i as u16;
        worksheet.write_string(0, col, &column.name)?;

        for (r, cell) in column.cells.iter().enumerate() {
            let row = r as u32 + 1;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Date(d) => {
                    worksheet.write_datetime_with_format(row, col, d, &date_format)?;
                }
                Cell::Null => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Error(_) => Cell::Null,
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            data.as_datetime().map_or(Cell::Null, Cell::Date)
        }
    }
}

fn header_name(cell: &Data, index: usize) -> String {
    let name = match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };

    if name.is_empty() {
        format!("Unnamed: {index}")
    } else {
        name
    }
}

/// Disambiguate duplicate header names with a `.N` suffix, keeping the
/// first occurrence as-is.
fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name.clone()
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("round.xlsx");

        let table = SpreadsheetTable::new(vec![
            Column::new(
                "fecha",
                vec![Cell::Text("2024-01".to_string()), Cell::Text("2024-02".to_string())],
            ),
            Column::new("total", vec![Cell::Number(10.0), Cell::Number(2.5)]),
            Column::new("nota", vec![Cell::Text("ok".to_string()), Cell::Null]),
        ])
        .unwrap();

        save(&table, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = load(&temp_dir.path().join("nope.xlsx"));
        assert!(matches!(result, Err(JanitorError::Load { .. })));
    }

    #[test]
    fn test_load_rejects_non_spreadsheet_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(JanitorError::Load { .. })));
    }

    #[test]
    fn test_duplicate_headers_are_mangled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dupes.xlsx");

        // " total " and "total" collide once trimmed on load.
        let table = SpreadsheetTable::new(vec![
            Column::new("fecha", vec![Cell::Number(1.0)]),
            Column::new(" total ", vec![Cell::Number(2.0)]),
            Column::new("total", vec![Cell::Number(3.0)]),
        ])
        .unwrap();

        save(&table, &path).unwrap();
        let loaded = load(&path).unwrap();

        let names: Vec<&str> = loaded.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fecha", "total", "total.1"]);
    }

    #[test]
    fn test_unique_names_numbering() {
        let names = unique_names(vec![
            "a".to_string(),
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(names, vec!["a", "a.1", "b", "a.2"]);
    }
}
