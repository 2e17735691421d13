//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{MetricsArgs, ReverseArgs, SimulateArgs, ValueArgs};

/// Intrinsic - DCF valuation, Monte Carlo uncertainty and reverse DCF
#[derive(Parser)]
#[command(name = "intrinsic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine settings file (TOML with [valuation] and [simulation] tables)
    #[arg(short, long, global = true, env = "INTRINSIC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deterministic intrinsic value from EPS or FCF
    Value(ValueArgs),

    /// Monte Carlo distribution of intrinsic value
    Simulate(SimulateArgs),

    /// Growth rate implied by the current share price
    Reverse(ReverseArgs),

    /// Payback, multiples and ratios derived from a valuation
    Metrics(MetricsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Options every command shares.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Output format
    pub format: OutputFormat,
    /// Suppress headers and warnings
    pub quiet: bool,
}
