//! Levenberg–Marquardt for two-parameter curve fits.
//!
//! Minimizes `Σ (y_i - f(x_i; p))^2` over `p = (a, b)` given `f` and its
//! gradient with respect to `p`. Each iteration solves the damped normal
//! equations
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr
//! ```
//!
//! with a 2×2 Cholesky factorization and accepts the step only if the sum of
//! squared residuals decreases (λ shrinks on success, grows on rejection).
//!
//! Termination tests follow MINPACK's `lmder`, with `D = diag(‖J_a‖, ‖J_b‖)`:
//! - `ftol`: actual and predicted relative reductions both `<= ftol`, ratio `<= 2`
//! - `xtol`: `‖D·δ‖ <= xtol·‖D·p‖`
//! - `gtol`: `max_i |J_iᵀr| / (‖J_i‖·‖r‖) <= gtol`
//!
//! `ftol` and `xtol` only say the last step was small. They end the run only
//! when the point is also stationary (gradient cosine below
//! `STATIONARY_COSINE`) or the residual is at rounding level; otherwise the
//! iteration continues until the evaluation budget runs out.

use nalgebra::{Matrix2, Vector2};

/// MINPACK's default `ftol` / `xtol` / `gtol` (√ machine epsilon).
pub const DEFAULT_TOL: f64 = 1.490_116_119_384_765_6e-8;

/// Largest gradient cosine accepted when a small step ends the run.
pub const STATIONARY_COSINE: f64 = 1e-5;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e32;

#[derive(Debug, Clone, Copy)]
pub struct LmOptions {
    /// Budget of residual evaluations (each trial point costs one).
    pub max_evaluations: usize,
    pub ftol: f64,
    pub xtol: f64,
    pub gtol: f64,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            max_evaluations: 10_000,
            ftol: DEFAULT_TOL,
            xtol: DEFAULT_TOL,
            gtol: DEFAULT_TOL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmSolution {
    pub params: [f64; 2],
    pub sse: f64,
    pub evaluations: usize,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LmFailure {
    #[error("residuals are not finite at the starting point")]
    NonFiniteStart,
    #[error("Jacobian is not finite at a = {a}, b = {b}")]
    NonFiniteJacobian { a: f64, b: f64 },
    #[error("no convergence within {0} evaluations")]
    BudgetExhausted(usize),
    #[error("damping diverged without reducing the residual")]
    Stalled,
}

/// Normal-equation pieces at one point.
struct Linearization {
    jtj: Matrix2<f64>,
    jtr: Vector2<f64>,
}

impl Linearization {
    fn at<F, G>(x: &[f64], y: &[f64], p: [f64; 2], f: &F, grad: &G) -> Self
    where
        F: Fn(f64, [f64; 2]) -> f64,
        G: Fn(f64, [f64; 2]) -> [f64; 2],
    {
        let mut jtj = Matrix2::<f64>::zeros();
        let mut jtr = Vector2::<f64>::zeros();
        for (&xi, &yi) in x.iter().zip(y) {
            let g = Vector2::from(grad(xi, p));
            let r = yi - f(xi, p);
            jtj += g * g.transpose();
            jtr += g * r;
        }
        Self { jtj, jtr }
    }

    fn is_finite(&self) -> bool {
        self.jtj.iter().all(|v| v.is_finite()) && self.jtr.iter().all(|v| v.is_finite())
    }

    /// Column norms `‖J_a‖`, `‖J_b‖`.
    fn column_norms(&self) -> Vector2<f64> {
        Vector2::new(self.jtj[(0, 0)].sqrt(), self.jtj[(1, 1)].sqrt())
    }

    /// `max_i |J_iᵀr| / (‖J_i‖·‖r‖)`; zero columns are ignored.
    fn gradient_cosine(&self, sse: f64) -> f64 {
        let r_norm = sse.sqrt();
        if r_norm == 0.0 {
            return 0.0;
        }
        let norms = self.column_norms();
        (0..2)
            .filter(|&i| norms[i] > 0.0)
            .map(|i| self.jtr[i].abs() / (norms[i] * r_norm))
            .fold(0.0, f64::max)
    }
}

/// Gradient cosine `max_i |J_iᵀr| / (‖J_i‖·‖r‖)` of the fit at `p`.
///
/// Zero at a stationary point of the sum of squares.
pub fn gradient_cosine<F, G>(x: &[f64], y: &[f64], p: [f64; 2], f: F, grad: G) -> f64
where
    F: Fn(f64, [f64; 2]) -> f64,
    G: Fn(f64, [f64; 2]) -> [f64; 2],
{
    let sse: f64 = x.iter().zip(y).map(|(&xi, &yi)| (yi - f(xi, p)).powi(2)).sum();
    Linearization::at(x, y, p, &f, &grad).gradient_cosine(sse)
}

/// Run Levenberg–Marquardt from `p0`.
///
/// `f(x, p)` evaluates the model; `grad(x, p)` returns `[∂f/∂a, ∂f/∂b]`.
pub fn levenberg_marquardt<F, G>(
    x: &[f64],
    y: &[f64],
    p0: [f64; 2],
    f: F,
    grad: G,
    opts: &LmOptions,
) -> Result<LmSolution, LmFailure>
where
    F: Fn(f64, [f64; 2]) -> f64,
    G: Fn(f64, [f64; 2]) -> [f64; 2],
{
    let sse_at = |p: [f64; 2]| -> f64 {
        x.iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let r = yi - f(xi, p);
                r * r
            })
            .sum()
    };

    let mut p = Vector2::new(p0[0], p0[1]);
    let mut evaluations = 1;
    let mut sse = sse_at(p0);
    if !sse.is_finite() {
        return Err(LmFailure::NonFiniteStart);
    }

    // Residual level indistinguishable from an exact fit.
    let y_norm_sq: f64 = y.iter().map(|v| v * v).sum();
    let exact_sse = f64::EPSILON * y_norm_sq;

    let mut lambda = LAMBDA_INIT;
    let mut iterations = 0;
    let mut small_step = false;

    loop {
        iterations += 1;
        let pa = [p[0], p[1]];

        let lin = Linearization::at(x, y, pa, &f, &grad);
        if !lin.is_finite() {
            return Err(LmFailure::NonFiniteJacobian { a: p[0], b: p[1] });
        }
        if sse == 0.0 || lin.jtr.iter().all(|v| *v == 0.0) {
            return Ok(solution(p, sse, evaluations, iterations));
        }

        let cosine = lin.gradient_cosine(sse);
        if cosine <= opts.gtol {
            return Ok(solution(p, sse, evaluations, iterations));
        }
        if small_step && (cosine <= STATIONARY_COSINE || sse <= exact_sse) {
            return Ok(solution(p, sse, evaluations, iterations));
        }
        small_step = false;

        let scale = lin.column_norms();
        let p_scaled_norm = scale.component_mul(&p).norm();

        // Inner loop: raise damping until a step reduces the SSE.
        loop {
            if evaluations >= opts.max_evaluations {
                return Err(LmFailure::BudgetExhausted(opts.max_evaluations));
            }

            let mut diag = Vector2::<f64>::zeros();
            for i in 0..2 {
                diag[i] = lin.jtj[(i, i)].max(f64::MIN_POSITIVE);
            }
            let mut damped = lin.jtj;
            for i in 0..2 {
                damped[(i, i)] += lambda * diag[i];
            }

            let Some(chol) = damped.cholesky() else {
                lambda *= 10.0;
                if lambda > LAMBDA_MAX {
                    return Err(LmFailure::Stalled);
                }
                continue;
            };
            let delta = chol.solve(&lin.jtr);
            let p_new = p + delta;

            evaluations += 1;
            let sse_new = sse_at([p_new[0], p_new[1]]);

            // Relative reductions: actual, and predicted by the linear model.
            let actual = if sse_new.is_finite() { 1.0 - sse_new / sse } else { -1.0 };
            let predicted =
                (delta.dot(&(lin.jtj * delta)) + 2.0 * lambda * delta.dot(&diag.component_mul(&delta))) / sse;
            let ratio = if predicted > 0.0 { actual / predicted } else { 0.0 };

            small_step = (actual.abs() <= opts.ftol && predicted <= opts.ftol && 0.5 * ratio <= 1.0)
                || scale.component_mul(&delta).norm() <= opts.xtol * p_scaled_norm;

            if sse_new.is_finite() && sse_new < sse {
                p = p_new;
                sse = sse_new;
                lambda = (lambda / 10.0).max(LAMBDA_MIN);
                break;
            }

            lambda *= 10.0;
            if small_step {
                // Re-check stationarity at the unchanged point.
                break;
            }
            if lambda > LAMBDA_MAX {
                return Err(LmFailure::Stalled);
            }
        }
    }
}

fn solution(p: Vector2<f64>, sse: f64, evaluations: usize, iterations: usize) -> LmSolution {
    LmSolution {
        params: [p[0], p[1]],
        sse,
        evaluations,
        iterations,
    }
}
