//! Display formatting: numbers, cells, and the full result text.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - the decimal separator only ever touches display strings

use crate::data::Cell;
use crate::domain::{DecimalSeparator, RegressionOutcome};

/// Decimal places used for every displayed number (except the human formula).
pub const DISPLAY_DECIMALS: usize = 6;

/// Render `value` with 6 decimals, swapping the decimal point when configured.
///
/// Non-finite values pass through as their plain string form (`NaN`, `inf`).
/// Values that round to zero never carry a minus sign.
pub fn format_number(value: f64, separator: DecimalSeparator) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut text = format!("{value:.prec$}", prec = DISPLAY_DECIMALS);
    if text.starts_with('-') && text[1..].bytes().all(|c| c == b'0' || c == b'.') {
        text.remove(0);
    }
    match separator {
        DecimalSeparator::Point => text,
        DecimalSeparator::Comma => text.replace('.', ","),
    }
}

/// Render a table cell: numbers are formatted, anything else passes through unchanged.
pub fn format_cell(cell: &Cell, separator: DecimalSeparator) -> String {
    match cell {
        Cell::Number(v) => format_number(*v, separator),
        Cell::Text(s) => s.clone(),
        Cell::Empty => String::new(),
    }
}

/// Full result text for one regression outcome.
pub fn format_outcome(outcome: &RegressionOutcome, separator: DecimalSeparator) -> String {
    let fmt = |v: f64| format_number(v, separator);
    let mut out = String::new();

    out.push_str(&format!("Best model: {}\n\n", outcome.best_model_name));
    out.push_str(&format!("R²: {}\n", fmt(outcome.best_r2)));
    out.push_str(&format!("Formula: {}\n", outcome.best_model.generic_formula()));
    out.push_str(&format!("Fitted: {}\n", outcome.human_formula));
    out.push_str(&format!(
        "Coefficients: {}, {}\n",
        fmt(outcome.best_params.a),
        fmt(outcome.best_params.b)
    ));
    out.push_str(&format!("Spreadsheet formula: {}\n\n", outcome.spreadsheet_formula));

    out.push_str("Metrics for all models:\n");
    for m in &outcome.all_results {
        let chosen = if m.model_name == outcome.best_model_name { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {}: R^2={}, MAE={}, MSE={}, RMSE={}\n",
            m.model_name,
            fmt(m.r2),
            fmt(m.mae),
            fmt(m.mse),
            fmt(m.rmse)
        ));
    }
    for s in &outcome.skipped {
        out.push_str(&format!("  (skipped {}) {}\n", s.model_name, s.reason));
    }

    let c = &outcome.clean;
    out.push_str(&format!(
        "\nRows: read={} used={} | missing={} non-positive={} outliers x={} y={}\n",
        c.rows_read, c.rows_used, c.missing, c.non_positive, c.outliers_x, c.outliers_y
    ));

    out
}
