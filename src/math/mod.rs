//! Numerical building blocks: linear least squares, Levenberg–Marquardt, quantiles.

pub mod lm;
pub mod ols;
pub mod quantile;

pub use lm::*;
pub use ols::*;
pub use quantile::*;
