//! Valuation configuration.
//!
//! [`ValuationConfig`] holds the growth-band thresholds, the decay factor
//! anchored at each band, the rate limits enforced by validation, and the
//! defaults applied to omitted inputs. It is immutable once built and passed
//! by reference into the growth model, validator, calculator and simulator.
//!
//! Every field has a default, so a partial TOML table only overrides what it
//! names:
//!
//! ```rust
//! use intrinsic_core::ValuationConfig;
//!
//! let config: ValuationConfig = serde_json::from_str(r#"{"projection_years": 5}"#).unwrap();
//! assert_eq!(config.projection_years, 5);
//! assert_eq!(config.margin_of_safety, 0.25);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::GrowthCategory;

/// Default number of explicit projection years.
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Default margin of safety haircut.
pub const DEFAULT_MARGIN_OF_SAFETY: f64 = 0.25;

/// One value per growth band, ordered low to high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthBands {
    /// Value for the low-growth band.
    pub low: f64,
    /// Value for the moderate-growth band.
    pub moderate: f64,
    /// Value for the high-growth band.
    pub high: f64,
}

impl GrowthBands {
    /// Creates a band triple.
    #[must_use]
    pub fn new(low: f64, moderate: f64, high: f64) -> Self {
        Self {
            low,
            moderate,
            high,
        }
    }

    fn is_ordered(&self) -> bool {
        self.low > 0.0 && self.low <= self.moderate && self.moderate <= self.high
    }
}

/// Hard limits on the rate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimits {
    /// Highest terminal growth rate a simulated sample may use.
    pub max_terminal_growth: f64,
    /// Lowest discount rate a simulated sample may use.
    pub min_discount_rate: f64,
    /// Highest initial growth rate accepted anywhere.
    pub max_initial_growth: f64,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            max_terminal_growth: 0.07,
            min_discount_rate: 0.05,
            max_initial_growth: 3.0,
        }
    }
}

/// Configuration shared by every valuation component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Projection horizon used when the caller omits one.
    pub projection_years: u32,

    /// Margin of safety used when the caller omits one.
    pub margin_of_safety: f64,

    /// Rate limits.
    pub limits: RateLimits,

    /// Growth thresholds separating the four growth categories.
    pub growth_thresholds: GrowthBands,

    /// Decay factor anchored at each growth threshold.
    pub decay_factors: GrowthBands,

    /// Extra decay per unit of growth above the high threshold.
    pub excess_decay_slope: f64,

    /// Cap on the extra decay above the high threshold.
    pub max_excess_decay: f64,

    /// Floor on the decay factor below the low threshold.
    pub min_decay_factor: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            projection_years: DEFAULT_PROJECTION_YEARS,
            margin_of_safety: DEFAULT_MARGIN_OF_SAFETY,
            limits: RateLimits::default(),
            growth_thresholds: GrowthBands::new(0.05, 0.10, 0.20),
            decay_factors: GrowthBands::new(0.15, 0.25, 0.35),
            excess_decay_slope: 0.5,
            max_excess_decay: 0.1,
            min_decay_factor: 0.1,
        }
    }
}

impl ValuationConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default projection horizon.
    #[must_use]
    pub fn with_projection_years(mut self, years: u32) -> Self {
        self.projection_years = years;
        self
    }

    /// Sets the default margin of safety.
    #[must_use]
    pub fn with_margin_of_safety(mut self, margin: f64) -> Self {
        self.margin_of_safety = margin;
        self
    }

    /// Sets the rate limits.
    #[must_use]
    pub fn with_limits(mut self, limits: RateLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks that bands are ordered and all factors positive.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.growth_thresholds.is_ordered() {
            return Err(CoreError::invalid_config(
                "growth thresholds must be positive and ordered low <= moderate <= high",
            ));
        }
        if !self.decay_factors.is_ordered() {
            return Err(CoreError::invalid_config(
                "decay factors must be positive and ordered low <= moderate <= high",
            ));
        }
        if self.min_decay_factor <= 0.0 {
            return Err(CoreError::invalid_config(
                "minimum decay factor must be positive",
            ));
        }
        if self.excess_decay_slope < 0.0 || self.max_excess_decay < 0.0 {
            return Err(CoreError::invalid_config(
                "excess decay slope and cap cannot be negative",
            ));
        }
        if self.projection_years == 0 {
            return Err(CoreError::invalid_config(
                "default projection years must be at least 1",
            ));
        }
        if !(0.0..1.0).contains(&self.margin_of_safety) {
            return Err(CoreError::invalid_config(
                "default margin of safety must be in [0, 1)",
            ));
        }
        if self.limits.min_discount_rate <= self.limits.max_terminal_growth {
            return Err(CoreError::invalid_config(
                "minimum discount rate must exceed maximum terminal growth",
            ));
        }
        Ok(())
    }

    /// Decay factor for an initial growth rate.
    ///
    /// Piecewise linear between the band anchors. Above the high threshold the
    /// excess growth adds `slope * excess`, capped at `max_excess_decay`; below
    /// the low threshold the low anchor is scaled down proportionally and
    /// floored at `min_decay_factor`.
    #[must_use]
    pub fn decay_factor(&self, initial_growth: f64) -> f64 {
        let t = &self.growth_thresholds;
        let d = &self.decay_factors;

        if initial_growth >= t.high {
            let excess = (initial_growth - t.high) * self.excess_decay_slope;
            d.high + excess.min(self.max_excess_decay)
        } else if initial_growth >= t.moderate {
            interpolate(initial_growth, t.moderate, t.high, d.moderate, d.high)
        } else if initial_growth >= t.low {
            interpolate(initial_growth, t.low, t.moderate, d.low, d.moderate)
        } else {
            (d.low * initial_growth / t.low).max(self.min_decay_factor)
        }
    }

    /// Growth category for an initial growth rate.
    #[must_use]
    pub fn growth_category(&self, initial_growth: f64) -> GrowthCategory {
        let t = &self.growth_thresholds;
        if initial_growth >= t.high {
            GrowthCategory::HighGrowth
        } else if initial_growth >= t.moderate {
            GrowthCategory::ModerateGrowth
        } else if initial_growth >= t.low {
            GrowthCategory::LowGrowth
        } else {
            GrowthCategory::VeryLowGrowth
        }
    }
}

fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let config = ValuationConfig::default();
        assert_eq!(config.projection_years, 10);
        assert_relative_eq!(config.margin_of_safety, 0.25);
        assert_relative_eq!(config.limits.max_terminal_growth, 0.07);
        assert_relative_eq!(config.limits.min_discount_rate, 0.05);
        assert_relative_eq!(config.limits.max_initial_growth, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_decay_factor_anchors() {
        let config = ValuationConfig::default();

        assert_relative_eq!(config.decay_factor(0.05), 0.15, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(0.10), 0.25, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(0.20), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_decay_factor_interpolation() {
        let config = ValuationConfig::default();

        // Halfway through each band lands halfway between its anchors
        assert_relative_eq!(config.decay_factor(0.15), 0.30, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(0.075), 0.20, epsilon = 1e-12);
    }

    #[test]
    fn test_decay_factor_excess_is_capped() {
        let config = ValuationConfig::default();

        assert_relative_eq!(config.decay_factor(0.30), 0.40, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(0.40), 0.45, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(2.0), 0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_decay_factor_floor() {
        let config = ValuationConfig::default();

        assert_relative_eq!(config.decay_factor(0.04), 0.12, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(0.01), 0.1, epsilon = 1e-12);
        assert_relative_eq!(config.decay_factor(-0.05), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_category() {
        let config = ValuationConfig::default();

        assert_eq!(config.growth_category(0.25), GrowthCategory::HighGrowth);
        assert_eq!(config.growth_category(0.20), GrowthCategory::HighGrowth);
        assert_eq!(config.growth_category(0.15), GrowthCategory::ModerateGrowth);
        assert_eq!(config.growth_category(0.05), GrowthCategory::LowGrowth);
        assert_eq!(config.growth_category(0.02), GrowthCategory::VeryLowGrowth);
    }

    #[test]
    fn test_validate_rejects_unordered_bands() {
        let mut config = ValuationConfig::default();
        config.growth_thresholds = GrowthBands::new(0.2, 0.1, 0.05);
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));

        let config = ValuationConfig::default().with_projection_years(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_override() {
        let config: ValuationConfig = toml::from_str(
            r#"
            margin_of_safety = 0.5

            [limits]
            max_initial_growth = 1.0
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.margin_of_safety, 0.5);
        assert_relative_eq!(config.limits.max_initial_growth, 1.0);
        assert_relative_eq!(config.limits.max_terminal_growth, 0.07);
        assert_eq!(config.projection_years, 10);
        assert_relative_eq!(config.decay_factors.high, 0.35);
    }
}
