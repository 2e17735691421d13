//! Valuation result types.

use chrono::{DateTime, Utc};
use intrinsic_core::{GrowthCategory, MethodKind, ValuationInputs};
use serde::{Deserialize, Serialize};

use crate::growth::DecayPoint;

/// One forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    /// Forecast year, starting at 1.
    pub year: u32,
    /// Projected EPS or FCF for the year.
    pub metric_value: f64,
    /// Growth rate applied to reach this year, in percent.
    pub growth_rate_pct: f64,
    /// `metric_value` discounted to today.
    pub present_value: f64,
}

/// Terminal value derived from the final forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalValueAnalysis {
    /// Metric in the last forecast year.
    pub final_metric_value: f64,
    /// Gordon growth value at the horizon.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub present_value_of_terminal: f64,
}

/// Headline valuation figures.
///
/// The two present values are on the metric's own basis (per share for EPS,
/// company-wide for FCF). `intrinsic_value` is always per share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    /// Sum of discounted forecast-year values.
    pub present_value_of_cash_flows: f64,
    /// Discounted terminal value.
    pub present_value_of_terminal: f64,
    /// Intrinsic value per share.
    pub intrinsic_value: f64,
    /// Conservative buy price.
    pub margin_of_safety_price: f64,
}

/// Growth path statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthAnalysis {
    /// Growth applied in year 1, in percent.
    pub starting_growth_rate_pct: f64,
    /// Growth applied in the final year, in percent.
    pub ending_growth_rate_pct: f64,
    /// Mean growth over the forecast, in percent.
    pub average_growth_rate_pct: f64,
    /// Growth band of the initial rate.
    pub category: GrowthCategory,
    /// Decay factor used.
    pub decay_factor: f64,
    /// Per-year decay diagnostics.
    pub decay_analysis: Vec<DecayPoint>,
}

/// Echo of the inputs with rates as whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSummary {
    /// Method used.
    pub method: MethodKind,
    /// Market price per share, when supplied.
    pub share_price: Option<f64>,
    /// Starting EPS or FCF.
    pub initial_metric: f64,
    /// Share count (FCF only).
    pub outstanding_shares: Option<f64>,
    /// First-year growth, percent.
    pub initial_growth_rate_pct: f64,
    /// Terminal growth, percent.
    pub terminal_growth_rate_pct: f64,
    /// Discount rate, percent.
    pub discount_rate_pct: f64,
    /// Margin of safety, percent.
    pub margin_of_safety_pct: f64,
    /// Forecast horizon.
    pub projection_years: u32,
}

impl InputSummary {
    /// Builds the summary from engine inputs.
    #[must_use]
    pub fn from_inputs(inputs: &ValuationInputs) -> Self {
        Self {
            method: inputs.method.kind(),
            share_price: inputs.share_price,
            initial_metric: inputs.initial_metric(),
            outstanding_shares: inputs.method.outstanding_shares(),
            initial_growth_rate_pct: inputs.growth_rate * 100.0,
            terminal_growth_rate_pct: inputs.terminal_growth_rate * 100.0,
            discount_rate_pct: inputs.discount_rate * 100.0,
            margin_of_safety_pct: inputs.margin_of_safety * 100.0,
            projection_years: inputs.projection_years,
        }
    }

    /// Initial growth as a decimal.
    #[must_use]
    pub fn growth_rate(&self) -> f64 {
        self.initial_growth_rate_pct / 100.0
    }

    /// Terminal growth as a decimal.
    #[must_use]
    pub fn terminal_growth_rate(&self) -> f64 {
        self.terminal_growth_rate_pct / 100.0
    }

    /// Discount rate as a decimal.
    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate_pct / 100.0
    }

    /// Market value on the metric's basis: price for EPS, market cap for FCF.
    #[must_use]
    pub fn market_value(&self) -> Option<f64> {
        let price = self.share_price?;
        Some(match self.outstanding_shares {
            Some(shares) => price * shares,
            None => price,
        })
    }

    /// Starting metric per share.
    #[must_use]
    pub fn metric_per_share(&self) -> Option<f64> {
        match self.outstanding_shares {
            Some(shares) if shares > 0.0 => Some(self.initial_metric / shares),
            Some(_) => None,
            None => Some(self.initial_metric),
        }
    }
}

/// Complete output of one deterministic valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Method used.
    pub method: MethodKind,
    /// Echoed inputs.
    pub inputs: InputSummary,
    /// Forecast years in order.
    pub year_by_year_projections: Vec<YearProjection>,
    /// Growth path statistics.
    pub growth_analysis: GrowthAnalysis,
    /// Terminal value breakdown.
    pub terminal_value_analysis: TerminalValueAnalysis,
    /// Headline figures.
    pub valuation: Valuation,
    /// When the valuation ran.
    pub calculated_at: DateTime<Utc>,
}

impl ProjectionResult {
    /// Intrinsic value per share.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        self.valuation.intrinsic_value
    }

    /// Margin of safety price per share.
    #[must_use]
    pub fn margin_of_safety_price(&self) -> f64 {
        self.valuation.margin_of_safety_price
    }

    /// Projected metric in the last forecast year.
    #[must_use]
    pub fn final_metric_value(&self) -> f64 {
        self.terminal_value_analysis.final_metric_value
    }

    /// Price over intrinsic value, when a price was supplied.
    #[must_use]
    pub fn price_to_intrinsic(&self) -> Option<f64> {
        let price = self.inputs.share_price?;
        (self.valuation.intrinsic_value != 0.0).then(|| price / self.valuation.intrinsic_value)
    }

    /// Percentage upside from price to intrinsic value.
    #[must_use]
    pub fn upside_pct(&self) -> Option<f64> {
        let price = self.inputs.share_price?;
        (price != 0.0).then(|| (self.valuation.intrinsic_value / price - 1.0) * 100.0)
    }
}
