//! Metrics command implementation.
//!
//! Payback, multiples and ratios derived from a valuation.

use anyhow::Result;
use clap::Args;

use intrinsic_analytics::{MetricsReport, ValuationCalculator};

use crate::cli::{Context, OutputFormat};
use crate::commands::ValuationArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{
    format_money, format_opt, format_pct, print_json_value, print_key_values, KeyValue,
};

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub valuation: ValuationArgs,

    /// Net current assets, for FCF-for-free (FCF method)
    #[arg(long)]
    pub net_current_assets: Option<f64>,
}

/// Execute the metrics command.
pub fn execute(args: MetricsArgs, settings: &Settings, ctx: Context) -> Result<()> {
    let params = args.valuation.to_params();
    let result = ValuationCalculator::new(&settings.valuation)
        .calculate(&params)
        .map_err(CliError::from)?;
    let report = MetricsReport::from_result(&result, args.net_current_assets);

    match ctx.format {
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Minimal => {
            println!("{}", format_opt(report.payback_years, |y| y.to_string()));
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = report_rows(&report);
            print_key_values("Derived Metrics", &rows, ctx.format, ctx.quiet)?;
        }
    }

    Ok(())
}

fn years(value: Option<u32>) -> String {
    format_opt(value, |y| format!("{y} years"))
}

fn ratio(value: Option<f64>) -> String {
    format_opt(value, |r| format!("{r:.2}"))
}

fn report_rows(report: &MetricsReport) -> Vec<KeyValue> {
    let ratios = &report.ratios;
    vec![
        KeyValue::new("Payback", years(report.payback_years)),
        KeyValue::new("Discounted Payback", years(report.discounted_payback_years)),
        KeyValue::new("Half-Life", years(report.half_life_years)),
        KeyValue::new(
            "Time to One",
            format_opt(report.time_to_one_years, |y| format!("{y:.1} years")),
        ),
        KeyValue::new("FCF for Free", years(report.fcf_for_free_years)),
        KeyValue::new("Owner Earnings", format_opt(report.owner_earnings, format_money)),
        KeyValue::new(
            "Owner Earnings Yield",
            format_opt(report.owner_earnings_yield_pct, format_pct),
        ),
        KeyValue::new("P/E", ratio(ratios.price_to_earnings)),
        KeyValue::new("Earnings Yield", format_opt(ratios.earnings_yield_pct, format_pct)),
        KeyValue::new("PEG", ratio(ratios.peg_ratio)),
        KeyValue::new("P/FCF", ratio(ratios.price_to_fcf)),
        KeyValue::new("FCF Yield", format_opt(ratios.fcf_yield_pct, format_pct)),
        KeyValue::new("Price / Intrinsic", ratio(ratios.price_to_intrinsic)),
        KeyValue::new("Price / MoS Price", ratio(ratios.price_to_margin_of_safety)),
    ]
}
