//! Command-line parsing for the best-fit curve selector.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code. Everything here is converted into a `FitConfig` / `SampleSpec`
//! before the library is called.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DecimalSeparator, ModelKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "bestfit",
    version,
    about = "Fit linear, exponential, logarithmic and power-law curves and pick the best"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit all models to two columns of a CSV file or workbook and report the best.
    Fit(FitArgs),
    /// List the columns of a CSV file or workbook.
    Columns(ColumnsArgs),
    /// Write a synthetic dataset drawn from one model.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV (`,`, `;` or TAB separated) or workbook (`.xlsx`, `.xls`, `.ods`, first sheet).
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// X column: header name, or zero-based index.
    #[arg(short = 'x', long = "x")]
    pub x_column: String,

    /// Y column: header name, or zero-based index.
    #[arg(short = 'y', long = "y")]
    pub y_column: String,

    /// Decimal separator for displayed numbers.
    #[arg(long, value_enum, env = "BESTFIT_DECIMAL", default_value_t = DecimalSeparator::Point)]
    pub decimal: DecimalSeparator,

    /// Cell referenced by the spreadsheet formula.
    #[arg(long, env = "BESTFIT_CELL", default_value = "A1")]
    pub cell: String,

    /// Residual-evaluation budget for iterative fits.
    #[arg(long, default_value_t = 10_000)]
    pub max_evals: usize,

    /// Outlier fence width in interquartile ranges.
    #[arg(long, default_value_t = 1.5)]
    pub iqr: f64,

    /// Fit candidates one after another instead of in parallel.
    #[arg(long)]
    pub serial: bool,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ColumnsArgs {
    /// Input CSV file or workbook.
    #[arg(short = 'f', long)]
    pub file: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Model to draw from.
    #[arg(short = 'm', long, value_enum)]
    pub model: ModelKind,

    /// Coefficient `a`.
    #[arg(long, allow_hyphen_values = true)]
    pub a: f64,

    /// Coefficient `b`.
    #[arg(long, allow_hyphen_values = true)]
    pub b: f64,

    /// Number of rows.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    #[arg(long, default_value_t = 1.0)]
    pub x_min: f64,

    #[arg(long, default_value_t = 10.0)]
    pub x_max: f64,

    /// Relative Gaussian noise level.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV file.
    #[arg(short = 'o', long)]
    pub out: PathBuf,

    /// Decimal separator for written values.
    #[arg(long, value_enum, env = "BESTFIT_DECIMAL", default_value_t = DecimalSeparator::Point)]
    pub decimal: DecimalSeparator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_command() {
        let cli = Cli::try_parse_from([
            "bestfit", "fit", "-f", "data.csv", "-x", "dose", "-y", "2", "--decimal", "comma", "--json",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.x_column, "dose");
        assert_eq!(args.y_column, "2");
        assert_eq!(args.decimal, DecimalSeparator::Comma);
        assert_eq!(args.max_evals, 10_000);
        assert!(args.json);
        assert!(!args.serial);
    }

    #[test]
    fn parses_sample_command_with_negative_coefficient() {
        let cli = Cli::try_parse_from([
            "bestfit", "sample", "-m", "exponential", "--a", "3", "--b", "-0.2", "-o", "out.csv",
        ])
        .unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.model, ModelKind::Exponential);
        assert_eq!(args.b, -0.2);
    }
}
