//! Value command implementation.
//!
//! Runs a deterministic DCF valuation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use intrinsic_analytics::{ProjectionResult, ValuationCalculator};

use crate::cli::{Context, OutputFormat};
use crate::commands::ValuationArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{
    format_money, format_opt, format_pct, print_header, print_json_value, print_key_values,
    print_output, KeyValue,
};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    #[command(flatten)]
    pub valuation: ValuationArgs,

    /// Hide the year-by-year projection table
    #[arg(long)]
    pub no_projections: bool,
}

/// One projected year, for tables and CSV.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Growth")]
    pub growth: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Present Value")]
    pub present_value: String,
}

/// Execute the value command.
pub fn execute(args: ValueArgs, settings: &Settings, ctx: Context) -> Result<()> {
    let params = args.valuation.to_params();
    let result = ValuationCalculator::new(&settings.valuation)
        .calculate(&params)
        .map_err(CliError::from)?;

    match ctx.format {
        OutputFormat::Table => {
            let title = format!("Intrinsic Value ({})", result.method);
            print_key_values(&title, &summary_rows(&result), ctx.format, ctx.quiet)?;

            if !args.no_projections {
                if !ctx.quiet {
                    print_header("Projections");
                }
                print_output(&year_rows(&result), ctx.format)?;
            }
        }
        OutputFormat::Json => print_json_value(&result)?,
        OutputFormat::Csv => print_output(&year_rows(&result), ctx.format)?,
        OutputFormat::Minimal => println!("{}", format_money(result.intrinsic_value())),
    }

    Ok(())
}

/// Headline figures of a valuation.
pub fn summary_rows(result: &ProjectionResult) -> Vec<KeyValue> {
    let inputs = &result.inputs;
    vec![
        KeyValue::money("Intrinsic Value", result.intrinsic_value()),
        KeyValue::new(
            format!("Margin of Safety Price ({:.0}%)", inputs.margin_of_safety_pct),
            format_money(result.margin_of_safety_price()),
        ),
        KeyValue::new("Share Price", format_opt(inputs.share_price, format_money)),
        KeyValue::new("Upside", format_opt(result.upside_pct(), format_pct)),
        KeyValue::money(
            "PV of Cash Flows",
            result.valuation.present_value_of_cash_flows,
        ),
        KeyValue::money("PV of Terminal Value", result.valuation.present_value_of_terminal),
        KeyValue::new("Growth Category", result.growth_analysis.category.to_string()),
        KeyValue::new(
            "Growth Path",
            format!(
                "{:.2}% -> {:.2}% (k = {:.3})",
                result.growth_analysis.starting_growth_rate_pct,
                result.growth_analysis.ending_growth_rate_pct,
                result.growth_analysis.decay_factor
            ),
        ),
    ]
}

fn year_rows(result: &ProjectionResult) -> Vec<YearRow> {
    result
        .year_by_year_projections
        .iter()
        .map(|p| YearRow {
            year: p.year,
            growth: format_pct(p.growth_rate_pct),
            metric: format_money(p.metric_value),
            present_value: format_money(p.present_value),
        })
        .collect()
}
