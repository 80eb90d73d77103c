//! Preprocessing: table columns → clean `(x, y)` samples.
//!
//! Steps, in order, on the two selected columns:
//!
//! 1. coerce both cells to numbers (decimal point or comma); failures are missing
//! 2. drop rows with a missing coordinate
//! 3. drop rows with `x <= 0` or `y <= 0` (log / power models need positive inputs)
//! 4. IQR outlier rejection on x, then on y using the rows that survived x
//! 5. fail with `EmptyDataset` if nothing is left
//!
//! Row-count minimums for fitting are enforced by the fit engine, not here.

use crate::data::table::{ColumnRef, Table};
use crate::domain::{CleanReport, SamplePoint};
use crate::error::{CleanStage, RegressionError};
use crate::math::iqr_fences;

/// Cleaned samples plus row accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedData {
    pub points: Vec<SamplePoint>,
    pub report: CleanReport,
}

/// Run the full preprocessing pipeline on two columns of `table`.
pub fn clean_columns(
    table: &Table,
    x_column: &ColumnRef,
    y_column: &ColumnRef,
    iqr_multiplier: f64,
) -> Result<CleanedData, RegressionError> {
    let x_idx = table.resolve(x_column)?;
    let y_idx = table.resolve(y_column)?;

    let mut report = CleanReport {
        rows_read: table.rows.len(),
        ..CleanReport::default()
    };

    // 1) + 2) Coerce, dropping rows where either coordinate is missing.
    let mut points = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let x = table.cell(row, x_idx).to_number(row);
        let y = table.cell(row, y_idx).to_number(row);
        match (x, y) {
            (Ok(x), Ok(y)) => points.push(SamplePoint { row, x, y }),
            (Err(e), _) | (_, Err(e)) => {
                log::trace!("treating row as missing: {e}");
                report.missing += 1;
            }
        }
    }
    ensure_not_empty(&points, CleanStage::Parse)?;

    // 3) Strictly positive coordinates only.
    let before = points.len();
    points.retain(|p| p.x > 0.0 && p.y > 0.0);
    report.non_positive = before - points.len();
    ensure_not_empty(&points, CleanStage::NonPositive)?;

    // 4) Sequential IQR filtering: x first, then y on the reduced set.
    report.outliers_x = reject_outliers(&mut points, |p| p.x, iqr_multiplier);
    ensure_not_empty(&points, CleanStage::OutliersX)?;
    report.outliers_y = reject_outliers(&mut points, |p| p.y, iqr_multiplier);
    ensure_not_empty(&points, CleanStage::OutliersY)?;

    report.rows_used = points.len();
    log::debug!(
        "preprocessing: read={} missing={} non_positive={} outliers_x={} outliers_y={} used={}",
        report.rows_read,
        report.missing,
        report.non_positive,
        report.outliers_x,
        report.outliers_y,
        report.rows_used
    );

    Ok(CleanedData { points, report })
}

/// Drop points whose coordinate lies outside the inclusive IQR fences.
///
/// Returns the number of points removed.
pub fn reject_outliers<F>(points: &mut Vec<SamplePoint>, coord: F, k: f64) -> usize
where
    F: Fn(&SamplePoint) -> f64,
{
    let values: Vec<f64> = points.iter().map(&coord).collect();
    let Some((lo, hi)) = iqr_fences(&values, k) else {
        return 0;
    };
    let before = points.len();
    points.retain(|p| {
        let v = coord(p);
        v >= lo && v <= hi
    });
    before - points.len()
}

fn ensure_not_empty(points: &[SamplePoint], stage: CleanStage) -> Result<(), RegressionError> {
    if points.is_empty() {
        Err(RegressionError::EmptyDataset { stage })
    } else {
        Ok(())
    }
}
