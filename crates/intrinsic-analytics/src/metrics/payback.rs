//! Payback-style metrics: years until cash recovers an outlay.

use intrinsic_core::MethodKind;
use serde::{Deserialize, Serialize};

use crate::valuation::ProjectionResult;

/// Whether projected flows are discounted before accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaybackBasis {
    /// Nominal projected values.
    #[default]
    Undiscounted,
    /// Present values.
    Discounted,
}

/// First year (1-based) in which cumulative `flows` reach `outlay`.
///
/// `None` if the flows never cover the outlay.
#[must_use]
pub fn payback_years(outlay: f64, flows: &[f64]) -> Option<u32> {
    let mut cumulative = 0.0;
    for (year, flow) in (1u32..).zip(flows) {
        cumulative += flow;
        if cumulative >= outlay {
            return Some(year);
        }
    }
    None
}

/// Years of projected EPS or FCF needed to earn back the market price.
///
/// The outlay is the share price for EPS and market capitalisation for FCF.
/// `None` without a price or when the horizon is too short.
#[must_use]
pub fn payback_time(result: &ProjectionResult, basis: PaybackBasis) -> Option<u32> {
    let outlay = result.inputs.market_value()?;
    let flows: Vec<f64> = result
        .year_by_year_projections
        .iter()
        .map(|p| match basis {
            PaybackBasis::Undiscounted => p.metric_value,
            PaybackBasis::Discounted => p.present_value,
        })
        .collect();
    payback_years(outlay, &flows)
}

/// Years of discounted FCF needed to cover the premium paid over net current
/// assets.
///
/// FCF valuations only. Returns `Some(0)` when the company trades at or
/// below its net current assets.
#[must_use]
pub fn fcf_for_free(result: &ProjectionResult, net_current_assets: f64) -> Option<u32> {
    if result.method != MethodKind::Fcf {
        return None;
    }
    let premium = result.inputs.market_value()? - net_current_assets;
    if premium <= 0.0 {
        return Some(0);
    }
    let discounted: Vec<f64> = result
        .year_by_year_projections
        .iter()
        .map(|p| p.present_value)
        .collect();
    payback_years(premium, &discounted)
}
