//! Spreadsheet workbook ingest (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
//!
//! Only the first worksheet is read. Its first row holds the column names;
//! numeric cells become `Cell::Number`, text stays `Cell::Text` so that
//! comma-decimal strings are coerced later by `data::clean` like CSV input.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::data::{Cell, Table};
use crate::error::AppError;

/// Extensions routed to the workbook reader (lower-case).
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Load the first worksheet of a workbook into a `Table`.
pub fn load_workbook(path: &Path) -> Result<Table, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::new(2, format!("Failed to open workbook '{}': {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::new(2, format!("Workbook '{}' has no worksheets.", path.display())))?
        .map_err(|e| AppError::new(2, format!("Failed to read worksheet in '{}': {e}", path.display())))?;

    table_from_range(&range)
}

/// First row → headers, remaining rows → cells.
pub fn table_from_range(range: &Range<Data>) -> Result<Table, AppError> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| AppError::new(2, "Worksheet is empty."))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let body = rows.map(|row| row.iter().map(cell_from_data).collect()).collect();
    Ok(Table::new(headers, body))
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) => Cell::from_text(s),
        Data::Empty => Cell::Empty,
        // Booleans, error cells and ISO date strings are not numeric samples.
        other => Cell::Text(other.to_string()),
    }
}
