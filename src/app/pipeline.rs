//! Shared regression pipeline used by the CLI (and any other front-end).
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table -> preprocessing -> fit all models -> select best -> render formulas
//!
//! Front-ends only decide where the table comes from and how the outcome is shown.

use crate::data::{ColumnRef, Table, clean_columns};
use crate::domain::{CleanReport, FitConfig, ModelMetrics, RegressionOutcome, SamplePoint, SkippedModel};
use crate::error::RegressionError;
use crate::fit::selection::{FitSelection, fit_and_select};
use crate::models::{human_formula, spreadsheet_formula_or_fallback};

/// Run one regression request on two columns of `table`.
pub fn run_regression(
    table: &Table,
    x_column: &ColumnRef,
    y_column: &ColumnRef,
    config: &FitConfig,
) -> Result<RegressionOutcome, RegressionError> {
    let cleaned = clean_columns(table, x_column, y_column, config.iqr_multiplier)?;
    run_on_samples(&cleaned.points, cleaned.report, config)
}

/// Fit, select and render for already-cleaned samples.
pub fn run_on_samples(
    points: &[SamplePoint],
    clean: CleanReport,
    config: &FitConfig,
) -> Result<RegressionOutcome, RegressionError> {
    let selection = fit_and_select(points, config.max_evaluations, config.parallel)?;
    Ok(build_outcome(&selection, clean, config))
}

fn build_outcome(selection: &FitSelection, clean: CleanReport, config: &FitConfig) -> RegressionOutcome {
    let best = &selection.best;

    let all_results = selection
        .fits
        .iter()
        .map(|f| ModelMetrics {
            model_name: f.model.display_name().to_string(),
            r2: f.metrics.r2,
            params: f.params,
            mae: f.metrics.mae,
            mse: f.metrics.mse,
            rmse: f.metrics.rmse,
        })
        .collect();

    let skipped = selection
        .skipped
        .iter()
        .map(|(kind, reason)| SkippedModel {
            model_name: kind.display_name().to_string(),
            reason: reason.clone(),
        })
        .collect();

    RegressionOutcome {
        best_model: best.model,
        best_model_name: best.model.display_name().to_string(),
        best_params: best.params,
        best_r2: best.metrics.r2,
        human_formula: human_formula(best.model, &best.params),
        spreadsheet_formula: spreadsheet_formula_or_fallback(
            best.model,
            &best.params,
            config.decimal_separator,
            &config.input_cell,
        ),
        all_results,
        skipped,
        clean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecimalSeparator, ModelKind};

    fn cols() -> (ColumnRef, ColumnRef) {
        (ColumnRef::Name("x".to_string()), ColumnRef::Name("y".to_string()))
    }

    #[test]
    fn end_to_end_linear_scenario() {
        let table = Table::from_columns("x", &[1.0, 2.0, 3.0, 4.0, 5.0], "y", &[2.1, 4.0, 6.2, 7.9, 10.1]);
        let (x, y) = cols();
        let outcome = run_regression(&table, &x, &y, &FitConfig::default()).unwrap();

        assert_eq!(outcome.best_model, ModelKind::Linear);
        assert_eq!(outcome.best_model_name, "Linear");
        assert!(outcome.best_r2 >= 0.99);
        assert!(outcome.spreadsheet_formula.starts_with("=(1.99"), "{}", outcome.spreadsheet_formula);
        assert!(outcome.spreadsheet_formula.contains(" * A1) + 0.09"), "{}", outcome.spreadsheet_formula);
        assert_eq!(outcome.human_formula, "y = 1.9900 * x + 0.0900");
        assert_eq!(outcome.clean.rows_used, 5);
    }

    #[test]
    fn comma_separator_only_changes_display() {
        let table = Table::from_columns("x", &[1.0, 2.0, 3.0, 4.0, 5.0], "y", &[2.1, 4.0, 6.2, 7.9, 10.1]);
        let (x, y) = cols();
        let point = run_regression(&table, &x, &y, &FitConfig::default()).unwrap();
        let comma_config = FitConfig {
            decimal_separator: DecimalSeparator::Comma,
            ..FitConfig::default()
        };
        let comma = run_regression(&table, &x, &y, &comma_config).unwrap();

        assert_eq!(point.best_params, comma.best_params);
        assert_eq!(point.all_results, comma.all_results);
        assert_eq!(comma.spreadsheet_formula, point.spreadsheet_formula.replace('.', ","));
    }

    #[test]
    fn one_surviving_row_is_insufficient() {
        let table = Table::from_columns("x", &[1.0, -2.0, 0.0], "y", &[3.0, 4.0, 5.0]);
        let (x, y) = cols();
        let err = run_regression(&table, &x, &y, &FitConfig::default()).unwrap_err();
        assert_eq!(err, RegressionError::InsufficientData { n: 1 });
    }

    #[test]
    fn zero_surviving_rows_is_empty() {
        let table = Table::from_columns("x", &[-1.0, 0.0], "y", &[3.0, 4.0]);
        let (x, y) = cols();
        let err = run_regression(&table, &x, &y, &FitConfig::default()).unwrap_err();
        assert!(matches!(err, RegressionError::EmptyDataset { .. }));
    }
}
