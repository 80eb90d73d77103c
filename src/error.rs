//! Error types.
//!
//! - `RegressionError`: typed failures of the library pipeline
//! - `AppError`: what the `bestfit` binary reports (message + exit code)

use crate::domain::ModelKind;

/// Preprocessing stage at which the working row set became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanStage {
    /// Numeric coercion / missing-value removal.
    Parse,
    /// Removal of rows with a non-positive coordinate.
    NonPositive,
    /// IQR outlier filter on x.
    OutliersX,
    /// IQR outlier filter on y.
    OutliersY,
}

impl CleanStage {
    pub fn describe(self) -> &'static str {
        match self {
            CleanStage::Parse => "no row has numeric values in both columns",
            CleanStage::NonPositive => "no row has strictly positive x and y",
            CleanStage::OutliersX => "every row was rejected as an x outlier",
            CleanStage::OutliersY => "every row was rejected as a y outlier",
        }
    }
}

/// Failures of the preprocessing / fitting / rendering pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressionError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A cell could not be read as a number. Recovered locally (the cell counts as missing).
    #[error("row {row}: value '{value}' is not numeric")]
    Parse { row: usize, value: String },

    #[error("preprocessing: {}", .stage.describe())]
    EmptyDataset { stage: CleanStage },

    #[error("fitting: need at least 2 valid rows, got {n}")]
    InsufficientData { n: usize },

    #[error("{} fit failed: {reason}", .model.display_name())]
    CandidateFit { model: ModelKind, reason: String },

    #[error("fitting: no model converged ({})", summarize_failures(.failures))]
    NoConvergence { failures: Vec<(ModelKind, String)> },

    #[error("cannot render {} formula: {reason}", .model.display_name())]
    FormulaRender { model: ModelKind, reason: String },
}

fn summarize_failures(failures: &[(ModelKind, String)]) -> String {
    let parts: Vec<String> = failures
        .iter()
        .map(|(kind, reason)| format!("{}: {reason}", kind.display_name()))
        .collect();
    parts.join("; ")
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        let exit_code = match err {
            RegressionError::ColumnNotFound(_) | RegressionError::Parse { .. } => 2,
            RegressionError::EmptyDataset { .. } | RegressionError::InsufficientData { .. } => 3,
            RegressionError::CandidateFit { .. }
            | RegressionError::NoConvergence { .. }
            | RegressionError::FormulaRender { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
