//! Command-line definition for the `geometry` binary.
//!
//! # Responsibility
//! - Declare subcommands and global flags.
//! - Map CLI-only enums onto core types.
//!
//! # Invariants
//! - Shape dimensions parse as raw `f64`, including negatives, so range
//!   checks happen in core validation and exit with the validation code.
//! - `--log-level` is only accepted together with `--log-dir`.

use clap::{Parser, Subcommand, ValueEnum};
use geometry_core::{ShapeKind, DEFAULT_HISTORY_LIMIT};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "geometry",
    version,
    about = "Geometric shape calculator with calculation history"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Database file (overrides the DB_PATH variable)")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Show timestamps in local time instead of UTC")]
    pub local_time: bool,
    #[arg(long, global = true, help = "Absolute directory for rolling log files")]
    pub log_dir: Option<String>,
    #[arg(
        long,
        global = true,
        requires = "log_dir",
        help = "Log level: trace|debug|info|warn|error"
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate and save a rectangle
    Rectangle {
        #[arg(allow_negative_numbers = true)]
        width: f64,
        #[arg(allow_negative_numbers = true)]
        height: f64,
    },
    /// Calculate and save a triangle given three sides
    Triangle {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
    },
    /// Calculate and save an isosceles trapezoid
    Trapezoid {
        #[arg(allow_negative_numbers = true)]
        base1: f64,
        #[arg(allow_negative_numbers = true)]
        base2: f64,
        #[arg(allow_negative_numbers = true)]
        height: f64,
    },
    /// Show saved calculations, newest first
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
    },
    /// Show aggregate statistics
    Stats,
    /// Delete all saved calculations
    Clear {
        #[arg(long, default_value_t = false, help = "Confirm deletion")]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShapeArg {
    Rectangle,
    Triangle,
    Trapezoid,
}

impl From<ShapeArg> for ShapeKind {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Rectangle => ShapeKind::Rectangle,
            ShapeArg::Triangle => ShapeKind::Triangle,
            ShapeArg::Trapezoid => ShapeKind::Trapezoid,
        }
    }
}
