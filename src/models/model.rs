//! Model evaluation for the four catalog families.
//!
//! The fitter relies on three primitive operations:
//! - predict `y(x)` given `(a, b)` (metrics, iterative fits)
//! - the gradient of `y(x)` with respect to `(a, b)` (Levenberg–Marquardt)
//! - a design row for models that are linear in `(a, b)` (direct solve)

use crate::domain::{ModelKind, Params};

/// Predict `y(x)` for the given model kind.
///
/// Outside a model's domain (e.g. `ln` of a non-positive `x`) this returns a
/// non-finite value; callers check for it.
pub fn predict(model: ModelKind, x: f64, params: &Params) -> f64 {
    let Params { a, b } = *params;
    match model {
        ModelKind::Linear => a * x + b,
        ModelKind::Exponential => a * (b * x).exp(),
        ModelKind::Logarithmic => a * x.ln() + b,
        ModelKind::PowerLaw => a * x.powf(b),
    }
}

/// `[∂y/∂a, ∂y/∂b]` at `x`.
pub fn gradient(model: ModelKind, x: f64, params: &Params) -> [f64; 2] {
    let Params { a, b } = *params;
    match model {
        ModelKind::Linear => [x, 1.0],
        ModelKind::Exponential => {
            let e = (b * x).exp();
            [e, a * x * e]
        }
        ModelKind::Logarithmic => [x.ln(), 1.0],
        ModelKind::PowerLaw => {
            let p = x.powf(b);
            [p, a * p * x.ln()]
        }
    }
}

/// Design row `[g(x), 1]` for models of the form `a·g(x) + b`.
///
/// Returns `None` for models that are nonlinear in `(a, b)`.
pub fn design_row(model: ModelKind, x: f64) -> Option<[f64; 2]> {
    match model {
        ModelKind::Linear => Some([x, 1.0]),
        ModelKind::Logarithmic => Some([x.ln(), 1.0]),
        ModelKind::Exponential | ModelKind::PowerLaw => None,
    }
}
