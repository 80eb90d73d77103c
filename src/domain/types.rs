//! Shared domain types.
//!
//! These are kept small and serializable so the same values can be:
//!
//! - threaded through preprocessing and fitting
//! - rendered as text by `report`
//! - printed as JSON by the CLI

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Decimal separator used when rendering numbers for display.
///
/// Has no effect on parsing (both notations are always accepted) or on any
/// internal computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// The closed catalog of candidate curve families, all of the form `f(x; a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// `a·x + b`
    Linear,
    /// `a·e^(b·x)`
    Exponential,
    /// `a·ln(x) + b`
    Logarithmic,
    /// `a·x^b`
    PowerLaw,
}

impl ModelKind {
    /// Catalog order. Fitting, reporting and tie-breaking all follow it.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Linear,
        ModelKind::Exponential,
        ModelKind::Logarithmic,
        ModelKind::PowerLaw,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::Exponential => "Exponential",
            ModelKind::Logarithmic => "Logarithmic",
            ModelKind::PowerLaw => "Power Law",
        }
    }

    /// Formula with symbolic coefficients.
    pub fn generic_formula(self) -> &'static str {
        match self {
            ModelKind::Linear => "y = a * x + b",
            ModelKind::Exponential => "y = a * e^(b * x)",
            ModelKind::Logarithmic => "y = a * ln(x) + b",
            ModelKind::PowerLaw => "y = a * x^b",
        }
    }

    /// True when `f` is linear in `(a, b)` and can be solved without iteration.
    pub fn is_linear_in_params(self) -> bool {
        matches!(self, ModelKind::Linear | ModelKind::Logarithmic)
    }

    /// Starting point for the iterative solver.
    pub fn initial_guess(self) -> Params {
        Params { a: 1.0, b: 1.0 }
    }

    /// Whether `f` is only defined for `x > 0`.
    pub fn requires_positive_x(self) -> bool {
        matches!(self, ModelKind::Logarithmic | ModelKind::PowerLaw)
    }
}

/// Fitted coefficient pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub a: f64,
    pub b: f64,
}

impl Params {
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }
}

/// One cleaned observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Zero-based index of the source row in the input table.
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

/// Goodness-of-fit diagnostics for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub r2: f64,
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub sse: f64,
    pub n: usize,
}

/// Fit output for a single candidate model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: ModelKind,
    pub params: Params,
    pub metrics: FitMetrics,
    /// Residual evaluations spent by the solver (1 for closed-form solves).
    pub evaluations: usize,
}

/// Row accounting for one preprocessing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    /// Rows dropped because a coordinate was missing or not numeric.
    pub missing: usize,
    pub non_positive: usize,
    pub outliers_x: usize,
    pub outliers_y: usize,
    pub rows_used: usize,
}

/// Per-model line of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub model_name: String,
    pub r2: f64,
    pub params: Params,
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
}

/// A model that was dropped from the batch, with a short diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedModel {
    pub model_name: String,
    pub reason: String,
}

/// Everything one regression request hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionOutcome {
    pub best_model: ModelKind,
    pub best_model_name: String,
    pub best_params: Params,
    pub best_r2: f64,
    pub human_formula: String,
    pub spreadsheet_formula: String,
    /// Fitted models in catalog order.
    pub all_results: Vec<ModelMetrics>,
    pub skipped: Vec<SkippedModel>,
    pub clean: CleanReport,
}

/// Knobs for one regression request.
///
/// Passed explicitly into every stage; nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub decimal_separator: DecimalSeparator,
    /// Residual-evaluation budget per iterative fit.
    pub max_evaluations: usize,
    /// Fence width in IQRs for outlier rejection.
    pub iqr_multiplier: f64,
    /// Cell referenced by spreadsheet formulas.
    pub input_cell: String,
    /// Fit candidates on the rayon pool.
    pub parallel: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            decimal_separator: DecimalSeparator::Point,
            max_evaluations: 10_000,
            iqr_multiplier: 1.5,
            input_cell: "A1".to_string(),
            parallel: true,
        }
    }
}
