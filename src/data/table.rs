//! In-memory tabular input.
//!
//! This is the boundary with whatever supplies the data (CSV loader, a UI,
//! tests): rows of loosely typed cells plus a header row.

use crate::error::RegressionError;

/// One input cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Build a cell from raw text (trimmed; blank means `Empty`).
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// Coerce to a finite number.
    ///
    /// Text accepts both decimal-point and decimal-comma notation. Blank,
    /// non-numeric and non-finite cells (`NaN`, `inf`) are errors.
    pub fn to_number(&self, row: usize) -> Result<f64, RegressionError> {
        let parsed = match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            Cell::Empty => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(RegressionError::Parse {
                row,
                value: match self {
                    Cell::Number(v) => v.to_string(),
                    Cell::Text(s) => s.clone(),
                    Cell::Empty => String::new(),
                },
            }),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_text(value)
    }
}

/// Column identifier: header name or zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{name}'"),
            ColumnRef::Index(idx) => write!(f, "#{idx}"),
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Two-column table from parallel numeric slices (handy for callers that already hold numbers).
    pub fn from_columns(x_name: &str, x: &[f64], y_name: &str, y: &[f64]) -> Self {
        let n = x.len().max(y.len());
        let rows = (0..n)
            .map(|i| {
                vec![
                    x.get(i).map_or(Cell::Empty, |&v| Cell::Number(v)),
                    y.get(i).map_or(Cell::Empty, |&v| Cell::Number(v)),
                ]
            })
            .collect();
        Self::new(vec![x_name.to_string(), y_name.to_string()], rows)
    }

    /// Number of columns (the header row or the widest data row).
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Resolve a column reference to a position.
    pub fn resolve(&self, column: &ColumnRef) -> Result<usize, RegressionError> {
        match column {
            ColumnRef::Name(name) => {
                let wanted = normalize_header_name(name);
                self.headers
                    .iter()
                    .position(|h| normalize_header_name(h) == wanted)
                    .ok_or_else(|| RegressionError::ColumnNotFound(column.to_string()))
            }
            ColumnRef::Index(idx) if *idx < self.width() => Ok(*idx),
            ColumnRef::Index(_) => Err(RegressionError::ColumnNotFound(column.to_string())),
        }
    }

    /// Cell at `(row, col)`; short rows read as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY_CELL)
    }
}

/// Spreadsheet exports sometimes prefix the first header with a BOM.
fn normalize_header_name(name: &str) -> &str {
    name.trim().trim_start_matches('\u{feff}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_and_point_decimals_parse() {
        assert_eq!(Cell::from("3,5").to_number(0), Ok(3.5));
        assert_eq!(Cell::from(" 3.5 ").to_number(0), Ok(3.5));
        assert_eq!(Cell::Number(2.0).to_number(0), Ok(2.0));
    }

    #[test]
    fn non_numeric_cells_are_parse_errors() {
        for cell in [Cell::from("abc"), Cell::Empty, Cell::from("NaN"), Cell::from("inf"), Cell::Number(f64::NAN)] {
            assert!(matches!(cell.to_number(7), Err(RegressionError::Parse { row: 7, .. })));
        }
        // Thousands separators are not understood.
        assert!(Cell::from("1.234,5").to_number(0).is_err());
    }

    #[test]
    fn resolve_by_name_and_index() {
        let table = Table::new(
            vec!["\u{feff}x".to_string(), " y ".to_string()],
            vec![vec![Cell::Number(1.0), Cell::Number(2.0)]],
        );
        assert_eq!(table.resolve(&ColumnRef::Name("x".to_string())), Ok(0));
        assert_eq!(table.resolve(&ColumnRef::Name("y".to_string())), Ok(1));
        assert_eq!(table.resolve(&ColumnRef::Index(1)), Ok(1));
        assert_eq!(
            table.resolve(&ColumnRef::Index(2)),
            Err(RegressionError::ColumnNotFound("#2".to_string()))
        );
        assert!(table.resolve(&ColumnRef::Name("z".to_string())).is_err());
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = Table::new(vec!["x".into(), "y".into()], vec![vec![Cell::Number(1.0)]]);
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert_eq!(table.cell(5, 0), &Cell::Empty);
    }
}
