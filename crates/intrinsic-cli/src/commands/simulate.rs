//! Simulate command implementation.
//!
//! Runs a Monte Carlo valuation over perturbed rates.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use intrinsic_analytics::simulation::{GrowthSampling, SafetyPercentile};
use intrinsic_analytics::{MonteCarloSimulator, SimulationOutcome, SimulationSummary};

use crate::cli::{Context, OutputFormat};
use crate::commands::value::summary_rows;
use crate::commands::ValuationArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{
    format_money, print_json_value, print_key_values, print_output, print_warning, KeyValue,
};

/// Growth sampling argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    /// Keep the first-year growth rate fixed
    Fixed,
    /// Draw growth from a log-normal around the input
    Lognormal,
}

/// Percentile reported as the margin of safety price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PercentileArg {
    /// 1st percentile
    P1,
    /// 10th percentile
    P10,
}

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub valuation: ValuationArgs,

    /// Number of trials
    #[arg(short, long)]
    pub trials: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// First-year growth treatment
    #[arg(long, value_enum)]
    pub sampling: Option<SamplingArg>,

    /// Log-space spread for log-normal growth
    #[arg(long, default_value = "0.2")]
    pub sigma: f64,

    /// Percentile reported as the margin of safety price
    #[arg(long, value_enum)]
    pub percentile: Option<PercentileArg>,

    /// Run trials on one thread
    #[arg(long)]
    pub sequential: bool,
}

/// One accepted trial, for CSV output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TrialRow {
    #[tabled(rename = "Trial")]
    pub trial: usize,
    #[tabled(rename = "Growth %")]
    pub growth_rate_pct: f64,
    #[tabled(rename = "Terminal %")]
    pub terminal_growth_rate_pct: f64,
    #[tabled(rename = "Discount %")]
    pub discount_rate_pct: f64,
    #[tabled(rename = "Intrinsic Value")]
    pub intrinsic_value: f64,
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, settings: &Settings, ctx: Context) -> Result<()> {
    let mut simulation = settings.simulation.clone();
    if let Some(trials) = args.trials {
        simulation.trials = trials;
    }
    if let Some(seed) = args.seed {
        simulation.seed = Some(seed);
    }
    match args.sampling {
        Some(SamplingArg::Fixed) => simulation.growth_sampling = GrowthSampling::Fixed,
        Some(SamplingArg::Lognormal) => {
            simulation.growth_sampling = GrowthSampling::LogNormal { sigma: args.sigma }
        }
        None => {}
    }
    match args.percentile {
        Some(PercentileArg::P1) => simulation.margin_of_safety_percentile = SafetyPercentile::P1,
        Some(PercentileArg::P10) => simulation.margin_of_safety_percentile = SafetyPercentile::P10,
        None => {}
    }
    if args.sequential {
        simulation.parallel = false;
    }
    simulation.validate().map_err(CliError::Config)?;

    let params = args.valuation.to_params();
    let outcome = MonteCarloSimulator::new(&settings.valuation, &simulation)
        .simulate_or_fallback(&params)
        .map_err(CliError::from)?;

    match (&outcome, ctx.format) {
        (_, OutputFormat::Json) => print_json_value(&outcome)?,
        (_, OutputFormat::Minimal) => println!("{}", format_money(outcome.intrinsic_value())),
        (SimulationOutcome::Simulated(summary), OutputFormat::Table) => {
            let rows = summary_table(summary);
            print_key_values("Monte Carlo Valuation", &rows, ctx.format, ctx.quiet)?;
        }
        (SimulationOutcome::Simulated(summary), OutputFormat::Csv) => {
            print_output(&trial_rows(summary), ctx.format)?;
        }
        (SimulationOutcome::Deterministic(result), format) => {
            if !ctx.quiet {
                print_warning("Every trial was rejected; showing the deterministic valuation");
            }
            let rows = summary_rows(result);
            print_key_values("Intrinsic Value (deterministic)", &rows, format, ctx.quiet)?;
        }
    }

    Ok(())
}

fn summary_table(summary: &SimulationSummary) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::money("Mean", summary.mean),
        KeyValue::money("Median", summary.median),
        KeyValue::money("1st Percentile", summary.percentile1),
        KeyValue::money("10th Percentile", summary.percentile10),
        KeyValue::money("90th Percentile", summary.percentile90),
        KeyValue::new(
            format!("Margin of Safety Price ({})", summary.margin_of_safety_percentile),
            format_money(summary.margin_of_safety_price),
        ),
        KeyValue::new(
            "Growth Range",
            format!(
                "{:.2}% - {:.2}%",
                summary.min_growth_rate * 100.0,
                summary.max_growth_rate * 100.0
            ),
        ),
        KeyValue::new(
            "Trials Accepted",
            format!("{} / {}", summary.trials_accepted, summary.trials_run),
        ),
        KeyValue::new("Growth Sampling", summary.growth_sampling.to_string()),
        KeyValue::new("Seed", summary.seed.to_string()),
    ];
    if summary.truncated {
        rows.push(KeyValue::new(
            "Truncated",
            format!("{} of {} trials run", summary.trials_run, summary.trials_requested),
        ));
    }
    rows
}

fn trial_rows(summary: &SimulationSummary) -> Vec<TrialRow> {
    summary
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| TrialRow {
            trial: i + 1,
            growth_rate_pct: r.inputs.initial_growth_rate_pct,
            terminal_growth_rate_pct: r.inputs.terminal_growth_rate_pct,
            discount_rate_pct: r.inputs.discount_rate_pct,
            intrinsic_value: r.intrinsic_value(),
        })
        .collect()
}
