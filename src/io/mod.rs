//! Input/output helpers.
//!
//! - CSV ingest into a `Table` (`ingest`)
//! - first-sheet workbook ingest (`workbook`)
//! - synthetic sample CSV writer (`export`)

pub mod export;
pub mod ingest;
pub mod workbook;

pub use export::*;
pub use ingest::*;
pub use workbook::*;
