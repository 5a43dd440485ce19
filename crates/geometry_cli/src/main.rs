//! Command-line controller for the geometry calculator.
//!
//! # Responsibility
//! - Parse user input into shape parameters and history commands.
//! - Drive `geometry_core` use cases and print their results.
//!
//! # Invariants
//! - Shape input is validated before the store is opened.
//! - Validation errors exit with code 2, storage errors with code 1.

mod cli;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use geometry_core::db::open_store;
use geometry_core::{
    default_log_level, init_logging, AnyShape, CalculationService, Rectangle, ServiceResult,
    Shape, SqliteCalculationRepository, StoreConfig, StoreError, Trapezoid, Triangle,
};
use log::{error, info};
use output::{CalculationOutput, ClearOutput};
use std::process::ExitCode;

const EXIT_STORAGE_ERROR: u8 = 1;
const EXIT_VALIDATION_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_validation() => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_VALIDATION_ERROR)
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("storage error: {err}");
            ExitCode::from(EXIT_STORAGE_ERROR)
        }
    }
}

fn run(cli: &Cli) -> ServiceResult<()> {
    let config = StoreConfig::resolve(cli.db.clone());

    // Validation happens here so bad input never touches the store.
    let shape: Option<AnyShape> = match cli.command {
        Commands::Rectangle { width, height } => Some(Rectangle::new(width, height)?.into()),
        Commands::Triangle { a, b, c } => Some(Triangle::new(a, b, c)?.into()),
        Commands::Trapezoid {
            base1,
            base2,
            height,
        } => Some(Trapezoid::new(base1, base2, height)?.into()),
        _ => None,
    };

    let conn = open_store(&config).map_err(StoreError::from)?;
    let service = CalculationService::new(SqliteCalculationRepository::try_new(&conn)?);

    if let Some(shape) = shape {
        let completed = service.record(shape)?;
        info!(
            "event=cli_command module=cli status=ok command=calculate shape_type={} id={}",
            completed.shape.kind(),
            completed.id
        );
        let result = CalculationOutput::from(&completed);
        if cli.json {
            output::print_json(&result);
        } else {
            println!("{}", output::render_calculation(&result));
        }
        return Ok(());
    }

    match &cli.command {
        Commands::History { limit, shape } => {
            let records = service.history(shape.map(Into::into), *limit)?;
            if cli.json {
                output::print_json(&records);
            } else {
                println!("{}", output::render_history(&records, cli.local_time));
            }
        }
        Commands::Stats => {
            let stats = service.statistics()?;
            if cli.json {
                output::print_json(&stats);
            } else {
                println!("{}", output::render_statistics(&stats, cli.local_time));
            }
        }
        Commands::Clear { yes } => {
            let deleted = service.clear_history(*yes)?;
            if cli.json {
                output::print_json(&ClearOutput {
                    confirmed: *yes,
                    deleted,
                });
            } else if *yes {
                println!("Deleted {deleted} calculations");
            } else {
                println!("Confirmation required: re-run with --yes to delete all calculations");
            }
        }
        // Recorded above.
        Commands::Rectangle { .. } | Commands::Triangle { .. } | Commands::Trapezoid { .. } => {}
    }

    Ok(())
}
