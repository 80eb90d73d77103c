//! `bestfit-curves` library crate.
//!
//! Fits paired `(x, y)` samples to four two-parameter curve families
//! (linear, exponential, logarithmic, power law), picks the best by R², and
//! renders the winner as a formula and a spreadsheet expression.
//!
//! The binary (`bestfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - other front-ends can hand in a `Table` directly

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use app::pipeline::{run_on_samples, run_regression};
pub use data::{Cell, ColumnRef, Table};
pub use domain::{DecimalSeparator, FitConfig, ModelKind, RegressionOutcome};
pub use error::RegressionError;
