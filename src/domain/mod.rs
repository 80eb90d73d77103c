//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration (`FitConfig`, `DecimalSeparator`)
//! - the model catalog (`ModelKind`)
//! - cleaned observations (`SamplePoint`)
//! - fit outputs (`FitResult`, `RegressionOutcome`, etc.)

pub mod types;

pub use types::*;
