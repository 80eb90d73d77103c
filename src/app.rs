//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the logger
//! - parses CLI arguments
//! - loads the CSV table
//! - runs the regression pipeline
//! - prints the outcome (text or JSON)

use clap::Parser;

use crate::cli::{ColumnsArgs, Command, FitArgs, SampleArgs};
use crate::data::{ColumnRef, SampleSpec, Table, generate_sample};
use crate::domain::{FitConfig, Params};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bestfit` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may provide BESTFIT_DECIMAL / BESTFIT_CELL defaults for clap.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Columns(args) => handle_columns(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let table = crate::io::load_table(&args.file)?;

    let x_column = column_ref(&table, &args.x_column);
    let y_column = column_ref(&table, &args.y_column);

    let outcome = pipeline::run_regression(&table, &x_column, &y_column, &config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| AppError::new(4, format!("Failed to serialize outcome: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_outcome(&outcome, config.decimal_separator));
    }

    Ok(())
}

fn handle_columns(args: ColumnsArgs) -> Result<(), AppError> {
    let table = crate::io::load_table(&args.file)?;
    println!("{} row(s)", table.rows.len());
    for (idx, name) in table.headers.iter().enumerate() {
        println!("{idx:>3}) {name}");
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        model: args.model,
        params: Params { a: args.a, b: args.b },
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let points = generate_sample(&spec)?;
    crate::io::write_sample_csv(&args.out, &points, args.decimal)?;
    println!("Wrote {} rows to {}", points.len(), args.out.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if !(args.iqr.is_finite() && args.iqr >= 0.0) {
        return Err(AppError::new(2, "--iqr must be finite and >= 0."));
    }
    if args.max_evals < 2 {
        return Err(AppError::new(2, "--max-evals must be >= 2."));
    }
    Ok(FitConfig {
        decimal_separator: args.decimal,
        max_evaluations: args.max_evals,
        iqr_multiplier: args.iqr,
        input_cell: args.cell.clone(),
        parallel: !args.serial,
    })
}

/// A header match wins; otherwise an all-digit argument is a zero-based index.
pub fn column_ref(table: &Table, arg: &str) -> ColumnRef {
    let by_name = ColumnRef::Name(arg.to_string());
    if table.resolve(&by_name).is_ok() {
        return by_name;
    }
    match arg.trim().parse::<usize>() {
        Ok(idx) => ColumnRef::Index(idx),
        Err(_) => by_name,
    }
}
