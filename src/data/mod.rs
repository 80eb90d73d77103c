//! Input data: tables, preprocessing, and synthetic samples.

pub mod clean;
pub mod sample;
pub mod table;

pub use clean::{CleanedData, clean_columns, reject_outliers};
pub use sample::{SampleSpec, generate_sample};
pub use table::{Cell, ColumnRef, Table};
