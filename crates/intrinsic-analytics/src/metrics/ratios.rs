//! Price ratios and owner earnings.

use intrinsic_core::MethodKind;
use serde::{Deserialize, Serialize};

use crate::valuation::ProjectionResult;

/// Sum of projected FCF over the horizon. FCF valuations only.
#[must_use]
pub fn owner_earnings(result: &ProjectionResult) -> Option<f64> {
    (result.method == MethodKind::Fcf).then(|| {
        result
            .year_by_year_projections
            .iter()
            .map(|p| p.metric_value)
            .sum()
    })
}

/// Owner earnings over market capitalisation, in percent.
#[must_use]
pub fn owner_earnings_yield(result: &ProjectionResult) -> Option<f64> {
    let earnings = owner_earnings(result)?;
    let market_cap = result.inputs.market_value()?;
    (market_cap > 0.0).then(|| earnings / market_cap * 100.0)
}

/// Simple valuation ratios. A ratio is `None` when the method does not
/// provide its inputs or its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    /// Price over FCF per share.
    pub price_to_fcf: Option<f64>,
    /// FCF per share over price, in percent.
    pub fcf_yield_pct: Option<f64>,
    /// Price over EPS.
    pub price_to_earnings: Option<f64>,
    /// EPS over price, in percent.
    pub earnings_yield_pct: Option<f64>,
    /// P/E over initial growth in whole percent.
    pub peg_ratio: Option<f64>,
    /// Price over intrinsic value.
    pub price_to_intrinsic: Option<f64>,
    /// Price over margin of safety price.
    pub price_to_margin_of_safety: Option<f64>,
}

impl FinancialRatios {
    /// Computes the ratios for a valuation that carries a share price.
    #[must_use]
    pub fn from_result(result: &ProjectionResult) -> Self {
        let Some(price) = result.inputs.share_price else {
            return Self::default();
        };
        let per_share = result.inputs.metric_per_share();
        let mut ratios = Self {
            price_to_intrinsic: divide(price, result.valuation.intrinsic_value),
            price_to_margin_of_safety: divide(price, result.valuation.margin_of_safety_price),
            ..Self::default()
        };

        match result.method {
            MethodKind::Fcf => {
                ratios.price_to_fcf = per_share.and_then(|fcf| divide(price, fcf));
                ratios.fcf_yield_pct = per_share.and_then(|fcf| divide(fcf, price)).map(|y| y * 100.0);
            }
            MethodKind::Eps => {
                ratios.price_to_earnings = per_share.and_then(|eps| divide(price, eps));
                ratios.earnings_yield_pct =
                    per_share.and_then(|eps| divide(eps, price)).map(|y| y * 100.0);
                ratios.peg_ratio = ratios
                    .price_to_earnings
                    .and_then(|pe| divide(pe, result.inputs.initial_growth_rate_pct));
            }
        }
        ratios
    }
}

fn divide(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0 && denominator.is_finite()).then(|| numerator / denominator)
}
