//! CLI command implementations.

pub mod metrics;
pub mod reverse;
pub mod simulate;
pub mod value;

// Re-export submodules for convenience
pub use metrics::MetricsArgs;
pub use reverse::ReverseArgs;
pub use simulate::SimulateArgs;
pub use value::ValueArgs;

use clap::{Args, ValueEnum};
use intrinsic_core::{MethodKind, ValuationParams};

/// Valuation method argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MethodArg {
    /// Earnings per share
    #[default]
    Eps,
    /// Free cash flow with a share count
    Fcf,
}

impl From<MethodArg> for MethodKind {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Eps => MethodKind::Eps,
            MethodArg::Fcf => MethodKind::Fcf,
        }
    }
}

/// Valuation inputs shared by every command. Rates are whole percentages.
#[derive(Args, Debug, Clone)]
pub struct ValuationArgs {
    /// Valuation method
    #[arg(short, long, value_enum, default_value = "eps")]
    pub method: MethodArg,

    /// Current share price
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Earnings per share (EPS method)
    #[arg(long)]
    pub eps: Option<f64>,

    /// Free cash flow (FCF method)
    #[arg(long)]
    pub fcf: Option<f64>,

    /// Shares outstanding (FCF method)
    #[arg(long)]
    pub shares: Option<f64>,

    /// First-year growth rate (percent, e.g. 15 for 15%)
    #[arg(short, long, allow_negative_numbers = true)]
    pub growth: f64,

    /// Terminal growth rate (percent)
    #[arg(long, default_value = "3", allow_negative_numbers = true)]
    pub terminal_growth: f64,

    /// Discount rate (percent)
    #[arg(short, long, default_value = "10")]
    pub discount: f64,

    /// Margin of safety (percent)
    #[arg(long, default_value = "50")]
    pub margin: f64,

    /// Explicit projection years
    #[arg(short, long, default_value = "10")]
    pub years: u32,
}

impl ValuationArgs {
    /// Engine parameters with rates converted to decimals.
    pub fn to_params(&self) -> ValuationParams {
        ValuationParams {
            method: self.method.into(),
            share_price: self.price,
            eps: self.eps,
            fcf: self.fcf,
            outstanding_shares: self.shares,
            growth_rate: Some(self.growth / 100.0),
            terminal_growth_rate: Some(self.terminal_growth / 100.0),
            discount_rate: Some(self.discount / 100.0),
            margin_of_safety: Some(self.margin / 100.0),
            projection_years: Some(self.years),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        valuation: ValuationArgs,
    }

    #[test]
    fn test_percent_conversion() {
        let harness =
            Harness::try_parse_from(["test", "--eps", "5", "--growth", "15", "--margin", "25"])
                .unwrap();
        let params = harness.valuation.to_params();

        assert_eq!(params.method, MethodKind::Eps);
        assert_eq!(params.eps, Some(5.0));
        assert_eq!(params.growth_rate, Some(0.15));
        assert_eq!(params.terminal_growth_rate, Some(0.03));
        assert_eq!(params.discount_rate, Some(0.1));
        assert_eq!(params.margin_of_safety, Some(0.25));
        assert_eq!(params.projection_years, Some(10));
    }

    #[test]
    fn test_fcf_method() {
        let harness = Harness::try_parse_from([
            "test", "--method", "fcf", "--fcf", "1000", "--shares", "100", "--growth", "12",
        ])
        .unwrap();
        let params = harness.valuation.to_params();

        assert_eq!(params.method, MethodKind::Fcf);
        assert_eq!(params.metric(), Some(1000.0));
        assert_eq!(params.outstanding_shares, Some(100.0));
    }

    #[test]
    fn test_growth_is_required() {
        assert!(Harness::try_parse_from(["test", "--eps", "5"]).is_err());
    }
}
