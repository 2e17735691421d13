//! Deterministic valuation.
//!
//! [`ValuationCalculator`] projects the method's metric along the growth
//! decay path, discounts each year, adds the discounted terminal value and
//! converts the total to a per-share intrinsic value.

mod calculator;
pub(crate) mod projection;
mod result;

pub use calculator::ValuationCalculator;
pub use result::{
    GrowthAnalysis, InputSummary, ProjectionResult, TerminalValueAnalysis, Valuation,
    YearProjection,
};
