//! Growth classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Growth band an initial growth rate falls into.
///
/// The same thresholds select the decay anchors in
/// [`ValuationConfig::decay_factor`](crate::ValuationConfig::decay_factor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthCategory {
    /// At or above the high threshold.
    HighGrowth,
    /// Between the moderate and high thresholds.
    ModerateGrowth,
    /// Between the low and moderate thresholds.
    LowGrowth,
    /// Below the low threshold.
    VeryLowGrowth,
}

impl fmt::Display for GrowthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrowthCategory::HighGrowth => "HIGH_GROWTH",
            GrowthCategory::ModerateGrowth => "MODERATE_GROWTH",
            GrowthCategory::LowGrowth => "LOW_GROWTH",
            GrowthCategory::VeryLowGrowth => "VERY_LOW_GROWTH",
        };
        write!(f, "{name}")
    }
}
