//! Linear least squares solver.
//!
//! Linear and logarithmic models are linear in `(a, b)`:
//!
//! ```text
//! minimize Σ (y_i - a·g(x_i) - b)^2
//! ```
//!
//! so they are solved directly from a design matrix with rows `[g(x_i), 1]`.
//!
//! We use SVD rather than QR: nalgebra's `QR::solve` is intended for square
//! systems, and SVD degrades gracefully when every `x` is the same (rank 1).

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
