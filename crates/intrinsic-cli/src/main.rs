//! Intrinsic CLI - Command-line interface for DCF valuation.
//!
//! # Usage
//!
//! ```bash
//! # Value a stock from EPS (rates in whole percent)
//! intrinsic value --eps 5 --growth 15 --price 100
//!
//! # Value from free cash flow
//! intrinsic value --method fcf --fcf 1000 --shares 100 --growth 12
//!
//! # Monte Carlo with a fixed seed
//! intrinsic simulate --eps 5 --growth 15 --trials 5000 --seed 42
//!
//! # Growth implied by the market price
//! intrinsic reverse --eps 5 --growth 15 --price 90
//!
//! # Payback and ratios
//! intrinsic metrics --method fcf --fcf 1000 --shares 100 --growth 12 --price 50
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Engine diagnostics go to stderr, silent unless RUST_LOG asks
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "error".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = config::load(cli.config.as_deref())?;
    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Value(args) => commands::value::execute(args, &settings, ctx)?,
        Commands::Simulate(args) => commands::simulate::execute(args, &settings, ctx)?,
        Commands::Reverse(args) => commands::reverse::execute(args, &settings, ctx)?,
        Commands::Metrics(args) => commands::metrics::execute(args, &settings, ctx)?,
    }

    Ok(())
}
