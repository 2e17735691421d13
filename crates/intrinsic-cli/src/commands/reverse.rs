//! Reverse command implementation.
//!
//! Solves for the growth rate the market price implies.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use intrinsic_analytics::reverse_dcf::ReverseDcfConfig;
use intrinsic_analytics::{AnalyticsError, MarketView, ReverseDcfInputs, ReverseDcfSolver};
use intrinsic_core::InputValidator;

use crate::cli::{Context, OutputFormat};
use crate::commands::ValuationArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{
    format_money, format_opt, format_rate, print_json_value, print_key_values, KeyValue,
};

/// Arguments for the reverse command.
#[derive(Args, Debug)]
pub struct ReverseArgs {
    #[command(flatten)]
    pub valuation: ValuationArgs,

    /// Highest growth rate searched (percent)
    #[arg(long, default_value = "50")]
    pub max_growth: f64,

    /// Solver tolerance on the growth rate (decimal)
    #[arg(long, default_value = "0.0001")]
    pub tolerance: f64,
}

/// Execute the reverse command.
pub fn execute(args: ReverseArgs, settings: &Settings, ctx: Context) -> Result<()> {
    let params = args.valuation.to_params();
    let validated = InputValidator::new(&settings.valuation)
        .validate(&params)
        .map_err(|e| CliError::from(AnalyticsError::from(e)))?;
    let market_price = validated
        .share_price
        .ok_or_else(|| CliError::MissingArgument("--price".to_string()))?;

    let inputs =
        ReverseDcfInputs::from_valuation(validated.inputs(), market_price, &settings.valuation);
    let solver = ReverseDcfSolver::new(&settings.valuation).with_settings(ReverseDcfConfig {
        upper: args.max_growth / 100.0,
        tolerance: args.tolerance,
        ..ReverseDcfConfig::default()
    });
    let implied = solver.solve(&inputs).map_err(CliError::from)?;

    match ctx.format {
        OutputFormat::Json => print_json_value(&implied)?,
        OutputFormat::Minimal => println!("{}", format_rate(implied.implied_growth_rate)),
        OutputFormat::Table | OutputFormat::Csv => {
            let view = format_opt(implied.market_view, |view| {
                let text = view.to_string();
                match (view, ctx.format) {
                    (_, OutputFormat::Csv) => text,
                    (MarketView::MoreOptimistic, _) => text.green().to_string(),
                    (MarketView::MorePessimistic | MarketView::NoGrowthExpected, _) => {
                        text.red().to_string()
                    }
                    (MarketView::InLine, _) => text.yellow().to_string(),
                }
            });
            let rows = vec![
                KeyValue::rate("Implied Growth", implied.implied_growth_rate),
                KeyValue::new(
                    "Expected Growth",
                    format_opt(implied.expected_growth_rate, format_rate),
                ),
                KeyValue::new("Market View", view),
                KeyValue::new("Market Value Matched", format_money(implied.target_value)),
                KeyValue::new("Iterations", implied.iterations.to_string()),
            ];
            print_key_values("Reverse DCF", &rows, ctx.format, ctx.quiet)?;
        }
    }

    Ok(())
}
