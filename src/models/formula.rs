//! Formula renderers.
//!
//! - human formula: 4-decimal coefficients, always with a decimal point
//! - spreadsheet formula: coefficients formatted with the configured
//!   separator, single input cell (conventionally `A1`)
//!
//! The spreadsheet grammar is fixed so results paste into common spreadsheet
//! applications unchanged:
//!
//! ```text
//! Linear       =(<a> * A1) + <b>
//! Exponential  =(<a> * EXP(<b> * A1))
//! Logarithmic  =(<a> * LN(A1)) + <b>
//! Power Law    =(<a> * (A1^<b>))
//! ```

use crate::domain::{DecimalSeparator, ModelKind, Params};
use crate::error::RegressionError;
use crate::report::format_number;

pub fn human_formula(model: ModelKind, params: &Params) -> String {
    let Params { a, b } = *params;
    match model {
        ModelKind::Linear => format!("y = {a:.4} * x + {b:.4}"),
        ModelKind::Exponential => format!("y = {a:.4} * e^({b:.4} * x)"),
        ModelKind::Logarithmic => format!("y = {a:.4} * ln(x) + {b:.4}"),
        ModelKind::PowerLaw => format!("y = {a:.4} * x^{b:.4}"),
    }
}

pub fn spreadsheet_formula(
    model: ModelKind,
    params: &Params,
    separator: DecimalSeparator,
    cell: &str,
) -> Result<String, RegressionError> {
    if !params.is_finite() {
        return Err(RegressionError::FormulaRender {
            model,
            reason: format!("non-finite coefficients (a={}, b={})", params.a, params.b),
        });
    }
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(RegressionError::FormulaRender {
            model,
            reason: "empty input cell reference".to_string(),
        });
    }

    let a = format_number(params.a, separator);
    let b = format_number(params.b, separator);
    Ok(match model {
        ModelKind::Linear => format!("=({a} * {cell}) + {b}"),
        ModelKind::Exponential => format!("=({a} * EXP({b} * {cell}))"),
        ModelKind::Logarithmic => format!("=({a} * LN({cell})) + {b}"),
        ModelKind::PowerLaw => format!("=({a} * ({cell}^{b}))"),
    })
}

/// Spreadsheet formula, or a descriptive placeholder when it cannot be rendered.
pub fn spreadsheet_formula_or_fallback(
    model: ModelKind,
    params: &Params,
    separator: DecimalSeparator,
    cell: &str,
) -> String {
    spreadsheet_formula(model, params, separator, cell).unwrap_or_else(|err| {
        log::warn!("{err}");
        format!("<unavailable: {err}>")
    })
}
