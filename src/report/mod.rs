//! Reporting: number formatting and result text.

pub mod format;

pub use format::*;
