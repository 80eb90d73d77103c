//! Fit every catalog model and pick the best one by R².
//!
//! Rules:
//! 1. Require at least 2 samples before attempting anything.
//! 2. A failing candidate is logged, recorded in `skipped`, and dropped.
//! 3. If every candidate fails, the request fails with `NoConvergence`.
//! 4. Best = maximum R²; ties keep the earlier catalog entry.

use rayon::prelude::*;

use crate::domain::{FitResult, ModelKind, SamplePoint};
use crate::error::RegressionError;
use crate::fit::fitter::fit_model;

/// Minimum number of samples for a two-parameter fit.
pub const MIN_SAMPLES: usize = 2;

/// Output of fitting + selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSelection {
    pub best: FitResult,
    /// Fits for all models that converged, in catalog order.
    pub fits: Vec<FitResult>,
    /// Models that failed and why, in catalog order.
    pub skipped: Vec<(ModelKind, String)>,
}

/// Fit all catalog models and select the best.
pub fn fit_and_select(
    points: &[SamplePoint],
    max_evaluations: usize,
    parallel: bool,
) -> Result<FitSelection, RegressionError> {
    let n = points.len();
    if n < MIN_SAMPLES {
        return Err(RegressionError::InsufficientData { n });
    }

    let fit_one = |kind: &ModelKind| (*kind, fit_model(*kind, points, max_evaluations));

    // Candidates share no mutable state. An indexed parallel collect keeps
    // catalog order, so the output is identical to the serial path.
    let attempts: Vec<(ModelKind, Result<FitResult, RegressionError>)> = if parallel {
        ModelKind::ALL.par_iter().map(fit_one).collect()
    } else {
        ModelKind::ALL.iter().map(fit_one).collect()
    };

    let mut fits = Vec::new();
    let mut skipped = Vec::new();
    for (kind, attempt) in attempts {
        match attempt {
            Ok(fit) => fits.push(fit),
            Err(err) => {
                log::warn!("{err}");
                let reason = match err {
                    RegressionError::CandidateFit { reason, .. } => reason,
                    other => other.to_string(),
                };
                skipped.push((kind, reason));
            }
        }
    }

    let Some(best) = select_best(&fits).cloned() else {
        return Err(RegressionError::NoConvergence { failures: skipped });
    };

    Ok(FitSelection { best, fits, skipped })
}

/// The fit with the highest R². Strict comparison: the first of equal scores wins.
///
/// A NaN R² never wins against a number.
pub fn select_best(fits: &[FitResult]) -> Option<&FitResult> {
    let mut iter = fits.iter();
    let mut best = iter.next()?;
    for f in iter {
        if f.metrics.r2 > best.metrics.r2 || (best.metrics.r2.is_nan() && !f.metrics.r2.is_nan()) {
            best = f;
        }
    }
    Some(best)
}
