//! Low-level fitting routines for a single model kind.
//!
//! Given cleaned samples `(x_i, y_i)` we estimate `(a, b)` minimizing
//!
//! ```text
//! Σ (y_i - f(x_i; a, b))^2
//! ```
//!
//! - Linear and logarithmic models are linear in `(a, b)`: one SVD solve.
//! - Exponential and power-law models: Levenberg–Marquardt from `(1, 1)`.
//!
//! and then score the fit (R², MAE, MSE, RMSE).

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitMetrics, FitResult, ModelKind, Params, SamplePoint};
use crate::error::RegressionError;
use crate::math::{LmOptions, levenberg_marquardt, solve_least_squares};
use crate::models::{design_row, gradient, predict};

/// Fit one candidate model.
///
/// Any failure (domain violation, non-convergence, overflow) is reported as
/// `CandidateFit` so the caller can drop this candidate and continue.
pub fn fit_model(
    model: ModelKind,
    points: &[SamplePoint],
    max_evaluations: usize,
) -> Result<FitResult, RegressionError> {
    let fail = |reason: String| RegressionError::CandidateFit { model, reason };

    if points.len() < 2 {
        return Err(fail(format!("need at least 2 points, got {}", points.len())));
    }

    // Extract raw arrays once.
    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y: Vec<f64> = points.iter().map(|p| p.y).collect();

    if x.iter().chain(&y).any(|v| !v.is_finite()) {
        return Err(fail("non-finite sample value".to_string()));
    }
    if model.requires_positive_x() && x.iter().any(|&v| v <= 0.0) {
        return Err(fail("domain error: x must be > 0".to_string()));
    }

    let (params, evaluations) = if model.is_linear_in_params() {
        (solve_linear(model, &x, &y).ok_or_else(|| fail("least-squares solve failed".to_string()))?, 1)
    } else {
        let opts = LmOptions {
            max_evaluations,
            ..LmOptions::default()
        };
        let p0 = model.initial_guess();
        let sol = levenberg_marquardt(
            &x,
            &y,
            [p0.a, p0.b],
            |xi, p| predict(model, xi, &Params { a: p[0], b: p[1] }),
            |xi, p| gradient(model, xi, &Params { a: p[0], b: p[1] }),
            &opts,
        )
        .map_err(|e| fail(e.to_string()))?;
        log::debug!(
            "{}: converged after {} iterations / {} evaluations",
            model.display_name(),
            sol.iterations,
            sol.evaluations
        );
        (Params { a: sol.params[0], b: sol.params[1] }, sol.evaluations)
    };

    if !params.is_finite() {
        return Err(fail("non-finite parameters".to_string()));
    }

    let y_pred: Vec<f64> = x.iter().map(|&xi| predict(model, xi, &params)).collect();
    if y_pred.iter().any(|v| !v.is_finite()) {
        return Err(fail("numerical overflow in fitted values".to_string()));
    }

    Ok(FitResult {
        model,
        params,
        metrics: compute_metrics(&y, &y_pred),
        evaluations,
    })
}

fn solve_linear(model: ModelKind, x: &[f64], y: &[f64]) -> Option<Params> {
    let n = x.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &xi) in x.iter().enumerate() {
        let row = design_row(model, xi)?;
        design[(i, 0)] = row[0];
        design[(i, 1)] = row[1];
    }
    let beta = solve_least_squares(&design, &DVector::from_column_slice(y))?;
    Some(Params { a: beta[0], b: beta[1] })
}

/// Goodness-of-fit metrics for observed `y` vs predicted `y_pred`.
///
/// R² = 1 - SSR/SST. For a constant response (SST = 0) R² is 1 when the fit is
/// exact and 0 otherwise.
pub fn compute_metrics(y: &[f64], y_pred: &[f64]) -> FitMetrics {
    let n = y.len();
    let n_f = n as f64;
    let mean = y.iter().sum::<f64>() / n_f;

    let mut sse = 0.0;
    let mut sae = 0.0;
    let mut sst = 0.0;
    for (&yi, &pi) in y.iter().zip(y_pred) {
        let r = yi - pi;
        sse += r * r;
        sae += r.abs();
        sst += (yi - mean) * (yi - mean);
    }

    let r2 = if sst > 0.0 {
        1.0 - sse / sst
    } else if sse == 0.0 {
        1.0
    } else {
        0.0
    };
    let mse = sse / n_f;

    FitMetrics {
        r2,
        mae: sae / n_f,
        mse,
        rmse: mse.sqrt(),
        sse,
        n,
    }
}
