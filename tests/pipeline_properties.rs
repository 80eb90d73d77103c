//! End-to-end properties of the regression pipeline.
//!
//! 1. **Recovery** - exact and noisy data from each family
//! 2. **Preprocessing guarantees** - positivity, outliers, boundaries
//! 3. **Determinism** - identical results across runs and execution modes

use approx::assert_abs_diff_eq;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use bestfit_curves::data::{SampleSpec, clean_columns, generate_sample};
use bestfit_curves::domain::{CleanReport, Params, SamplePoint};
use bestfit_curves::fit::fit_and_select;
use bestfit_curves::report::format_number;
use bestfit_curves::{
    Cell, ColumnRef, DecimalSeparator, FitConfig, ModelKind, RegressionError, Table, run_on_samples, run_regression,
};

fn xy() -> (ColumnRef, ColumnRef) {
    (ColumnRef::Name("x".to_string()), ColumnRef::Name("y".to_string()))
}

fn table_from_points(points: &[SamplePoint]) -> Table {
    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y: Vec<f64> = points.iter().map(|p| p.y).collect();
    Table::from_columns("x", &x, "y", &y)
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn exact_linear_data_selects_linear() {
    let x: Vec<f64> = (1..=100).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|&v| 3.0 * v + 2.0).collect();
    let table = Table::from_columns("x", &x, "y", &y);
    let (xc, yc) = xy();

    let outcome = run_regression(&table, &xc, &yc, &FitConfig::default()).unwrap();

    assert_eq!(outcome.best_model, ModelKind::Linear);
    assert_abs_diff_eq!(outcome.best_r2, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(outcome.best_params.a, 3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(outcome.best_params.b, 2.0, epsilon = 1e-3);
    assert_eq!(outcome.spreadsheet_formula, "=(3.000000 * A1) + 2.000000");
}

#[test]
fn noisy_samples_recover_their_family() {
    let cases = [
        (ModelKind::Exponential, Params { a: 2.0, b: 0.3 }),
        (ModelKind::Logarithmic, Params { a: 5.0, b: 10.0 }),
        (ModelKind::PowerLaw, Params { a: 1.5, b: 2.5 }),
    ];
    for (model, params) in cases {
        let spec = SampleSpec {
            model,
            params,
            count: 200,
            x_min: 1.0,
            x_max: 10.0,
            noise: 0.002,
            seed: 11,
        };
        let points = generate_sample(&spec).unwrap();
        let (xc, yc) = xy();
        let outcome = run_regression(&table_from_points(&points), &xc, &yc, &FitConfig::default()).unwrap();

        assert_eq!(outcome.best_model, model, "data drawn from {model:?}");
        assert!(outcome.best_r2 > 0.99, "{model:?}: r2={}", outcome.best_r2);
        assert_abs_diff_eq!(outcome.best_params.a, params.a, epsilon = 0.05 * params.a.abs());
        assert_abs_diff_eq!(outcome.best_params.b, params.b, epsilon = 0.05 * params.b.abs());
    }
}

#[test]
fn wide_range_exponential_selects_exponential() {
    // From the (1, 1) start the model overshoots by ~40 orders of magnitude.
    let x: Vec<f64> = (1..=100).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * (0.05 * v).exp()).collect();
    let table = Table::from_columns("x", &x, "y", &y);
    let (xc, yc) = xy();

    let outcome = run_regression(&table, &xc, &yc, &FitConfig::default()).unwrap();

    assert_eq!(outcome.best_model, ModelKind::Exponential, "skipped: {:?}", outcome.skipped);
    assert_abs_diff_eq!(outcome.best_r2, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.best_params.a, 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(outcome.best_params.b, 0.05, epsilon = 1e-8);
    assert!(outcome.all_results.iter().all(|m| m.r2 <= 1.0 + 1e-12 && m.r2 > 0.0));
}

#[test]
fn additive_noise_linear_data_fits() {
    let mut rng = StdRng::seed_from_u64(3);
    let noise = Normal::new(0.0, 0.5).unwrap();
    let x: Vec<f64> = (1..=60).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|&v| 4.0 * v + 7.0 + noise.sample(&mut rng)).collect();
    let table = Table::from_columns("x", &x, "y", &y);
    let (xc, yc) = xy();

    let outcome = run_regression(&table, &xc, &yc, &FitConfig::default()).unwrap();
    assert_eq!(outcome.best_model, ModelKind::Linear);
    assert_abs_diff_eq!(outcome.best_params.a, 4.0, epsilon = 0.1);
}

// ============================================================================
// Preprocessing guarantees
// ============================================================================

#[test]
fn non_positive_values_never_reach_the_fit() {
    let rows = vec![
        vec![Cell::from("1"), Cell::from("2")],
        vec![Cell::from("0"), Cell::from("3")],
        vec![Cell::from("2"), Cell::from("-4")],
        vec![Cell::from("3"), Cell::from("6,5")],
        vec![Cell::from("-7"), Cell::from("1")],
        vec![Cell::from("4"), Cell::from("8")],
    ];
    let table = Table::new(vec!["x".to_string(), "y".to_string()], rows);
    let (xc, yc) = xy();

    let cleaned = clean_columns(&table, &xc, &yc, 1.5).unwrap();
    let min_x = cleaned.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = cleaned.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    assert!(min_x > 0.0 && min_y > 0.0);
    assert_eq!(cleaned.report.non_positive, 3);

    let outcome = run_regression(&table, &xc, &yc, &FitConfig::default()).unwrap();
    assert_eq!(outcome.clean.rows_used, 3);
}

#[test]
fn far_outlier_does_not_influence_fit() {
    let table = Table::from_columns("x", &[1.0, 2.0, 3.0, 1000.0], "y", &[2.0, 4.0, 6.0, 5.0]);
    let (xc, yc) = xy();

    let outcome = run_regression(&table, &xc, &yc, &FitConfig::default()).unwrap();
    assert_eq!(outcome.clean.outliers_x, 1);
    assert_eq!(outcome.best_model, ModelKind::Linear);
    assert_abs_diff_eq!(outcome.best_params.a, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.best_params.b, 0.0, epsilon = 1e-9);
}

#[test]
fn boundary_row_counts() {
    let (xc, yc) = xy();

    let one = Table::from_columns("x", &[2.0, -1.0], "y", &[3.0, 3.0]);
    assert_eq!(
        run_regression(&one, &xc, &yc, &FitConfig::default()).unwrap_err(),
        RegressionError::InsufficientData { n: 1 }
    );

    let none = Table::from_columns("x", &[0.0, -1.0], "y", &[3.0, 3.0]);
    assert!(matches!(
        run_regression(&none, &xc, &yc, &FitConfig::default()).unwrap_err(),
        RegressionError::EmptyDataset { .. }
    ));
}

// ============================================================================
// Determinism and formatting
// ============================================================================

#[test]
fn repeated_runs_are_identical() {
    let spec = SampleSpec {
        model: ModelKind::PowerLaw,
        params: Params { a: 3.0, b: 0.6 },
        count: 80,
        x_min: 0.5,
        x_max: 30.0,
        noise: 0.05,
        seed: 99,
    };
    let points = generate_sample(&spec).unwrap();
    let config = FitConfig::default();

    let first = run_on_samples(&points, CleanReport::default(), &config).unwrap();
    let second = run_on_samples(&points, CleanReport::default(), &config).unwrap();
    assert_eq!(first, second);

    let serial = fit_and_select(&points, config.max_evaluations, false).unwrap();
    let parallel = fit_and_select(&points, config.max_evaluations, true).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn formatting_round_trip() {
    assert_eq!(format_number(3.14159265, DecimalSeparator::Comma), "3,141593");
    assert_eq!(format_number(3.14159265, DecimalSeparator::Point), "3.141593");
}

#[test]
fn end_to_end_scenario_from_text_cells() {
    let rows = [("1", "2,1"), ("2", "4,0"), ("3", "6,2"), ("4", "7,9"), ("5", "10,1")]
        .iter()
        .map(|(x, y)| vec![Cell::from(*x), Cell::from(*y)])
        .collect();
    let table = Table::new(vec!["x".to_string(), "y".to_string()], rows);
    let config = FitConfig {
        decimal_separator: DecimalSeparator::Comma,
        ..FitConfig::default()
    };

    let outcome = run_regression(&table, &ColumnRef::Index(0), &ColumnRef::Index(1), &config).unwrap();
    assert_eq!(outcome.best_model_name, "Linear");
    assert!(outcome.best_r2 >= 0.99);
    assert!(outcome.spreadsheet_formula.starts_with("=(1,99"));
    assert!(outcome.spreadsheet_formula.contains(" * A1) + 0,09"));
    assert_eq!(outcome.all_results[0].model_name, "Linear");
}
