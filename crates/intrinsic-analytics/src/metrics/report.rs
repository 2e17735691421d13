//! All derived metrics for one valuation.

use serde::{Deserialize, Serialize};

use super::multiples::{half_life, time_to_one};
use super::payback::{fcf_for_free, payback_time, PaybackBasis};
use super::ratios::{owner_earnings, owner_earnings_yield, FinancialRatios};
use crate::valuation::ProjectionResult;

/// Derived metrics bundled for display or transport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Nominal payback, in years.
    pub payback_years: Option<u32>,
    /// Discounted payback, in years.
    pub discounted_payback_years: Option<u32>,
    /// Years until the price multiple halves.
    pub half_life_years: Option<u32>,
    /// Years until the price multiple reaches one.
    pub time_to_one_years: Option<f64>,
    /// Years of discounted FCF covering the premium over net current assets.
    pub fcf_for_free_years: Option<u32>,
    /// Sum of projected FCF.
    pub owner_earnings: Option<f64>,
    /// Owner earnings over market capitalisation, in percent.
    pub owner_earnings_yield_pct: Option<f64>,
    /// Simple price ratios.
    pub ratios: FinancialRatios,
}

impl MetricsReport {
    /// Computes every metric. `fcf_for_free_years` needs `net_current_assets`.
    #[must_use]
    pub fn from_result(result: &ProjectionResult, net_current_assets: Option<f64>) -> Self {
        Self {
            payback_years: payback_time(result, PaybackBasis::Undiscounted),
            discounted_payback_years: payback_time(result, PaybackBasis::Discounted),
            half_life_years: half_life(result),
            time_to_one_years: time_to_one(result),
            fcf_for_free_years: net_current_assets.and_then(|nca| fcf_for_free(result, nca)),
            owner_earnings: owner_earnings(result),
            owner_earnings_yield_pct: owner_earnings_yield(result),
            ratios: FinancialRatios::from_result(result),
        }
    }
}
