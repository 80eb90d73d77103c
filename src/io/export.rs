//! Write sample datasets to CSV.
//!
//! Values honor the decimal separator; comma decimals switch the field
//! delimiter to `;` so the file stays readable by spreadsheets and by
//! `ingest::load_table`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{DecimalSeparator, SamplePoint};
use crate::error::AppError;
use crate::report::format_number;

/// Write `x,y` rows to a CSV file.
pub fn write_sample_csv(path: &Path, points: &[SamplePoint], separator: DecimalSeparator) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    write_sample(file, points, separator)
}

pub fn write_sample<W: Write>(writer: W, points: &[SamplePoint], separator: DecimalSeparator) -> Result<(), AppError> {
    let delimiter = match separator {
        DecimalSeparator::Point => b',',
        DecimalSeparator::Comma => b';',
    };
    let mut out = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    out.write_record(["x", "y"])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for p in points {
        out.write_record([format_number(p.x, separator), format_number(p.y, separator)])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV: {e}")))?;

    Ok(())
}
