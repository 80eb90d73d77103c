//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit each catalog model (`fitter`)
//! - run all candidates, drop failures, select the best by R² (`selection`)

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
