//! Secondary indicators derived from a completed valuation.
//!
//! Every function here reads a [`ProjectionResult`](crate::ProjectionResult)
//! and nothing else. A result that cannot be reached within the horizon is
//! `None`.

mod multiples;
mod payback;
mod ratios;
mod report;

pub use multiples::{half_life, time_to_one, MAX_EXTENSION_YEARS};
pub use payback::{fcf_for_free, payback_time, payback_years, PaybackBasis};
pub use ratios::{owner_earnings, owner_earnings_yield, FinancialRatios};
pub use report::MetricsReport;
