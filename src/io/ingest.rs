//! Table ingest.
//!
//! Turns a CSV file (or, by extension, a spreadsheet workbook) into a `Table`.
//! CSV cells stay raw text; coercion and cleaning belong to `data::clean`.
//!
//! Design goals:
//! - **Tolerant reading**: ragged rows are kept (short rows read as missing cells)
//! - **Delimiter detection**: comma-decimal exports usually separate fields with `;`
//! - **Separation of concerns**: no fitting logic here

use std::io::Read;
use std::path::Path;

use crate::data::{Cell, Table};
use crate::error::AppError;
use crate::io::workbook::{is_workbook_path, load_workbook};

/// Load a table from disk.
///
/// Workbook extensions go to the first-sheet workbook reader; anything else
/// is read as CSV with the delimiter detected from the header line.
pub fn load_table(path: &Path) -> Result<Table, AppError> {
    if is_workbook_path(path) {
        return load_workbook(path);
    }

    let bytes = std::fs::read(path)
        .map_err(|e| AppError::new(2, format!("Failed to read CSV '{}': {e}", path.display())))?;
    let header_end = bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len());
    let delimiter = detect_delimiter(&String::from_utf8_lossy(&bytes[..header_end]));

    read_table(bytes.as_slice(), delimiter)
}

/// Read a `Table` from any reader with a known delimiter.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, plus the header line.
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {}: {e}", idx + 2)))?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    if headers.is_empty() {
        return Err(AppError::new(2, "CSV has no header row."));
    }

    Ok(Table::new(headers, rows))
}

/// Pick the most frequent of `,` `;` TAB in the header line (ties and none → `,`).
pub fn detect_delimiter(header_line: &str) -> u8 {
    let count = |c: char| header_line.chars().filter(|&ch| ch == c).count();
    let mut best = (b',', count(','));
    for (byte, ch) in [(b';', ';'), (b'\t', '\t')] {
        let n = count(ch);
        if n > best.1 {
            best = (byte, n);
        }
    }
    best.0
}
