//! Growth decay model.
//!
//! Growth starts at the initial rate and decays exponentially toward the
//! terminal rate:
//!
//! ```text
//! g(t) = g_terminal + (g_initial - g_terminal) * exp(-k * t)
//! ```
//!
//! The decay factor `k` comes from the growth band of the initial rate (see
//! [`ValuationConfig::decay_factor`]); faster growers fade faster.

use intrinsic_core::{GrowthCategory, ValuationConfig};
use serde::{Deserialize, Serialize};

/// Exponential decay from an initial to a terminal growth rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthDecayModel {
    initial_growth: f64,
    terminal_growth: f64,
    decay_factor: f64,
    category: GrowthCategory,
}

impl GrowthDecayModel {
    /// Creates a model, deriving decay factor and category from `config`.
    #[must_use]
    pub fn new(initial_growth: f64, terminal_growth: f64, config: &ValuationConfig) -> Self {
        Self {
            initial_growth,
            terminal_growth,
            decay_factor: config.decay_factor(initial_growth),
            category: config.growth_category(initial_growth),
        }
    }

    /// Replaces the derived decay factor.
    ///
    /// Holding `k` fixed while varying the initial rate keeps projected values
    /// monotone in that rate, which the reverse solver depends on.
    #[must_use]
    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    /// Initial growth rate.
    #[must_use]
    pub fn initial_growth(&self) -> f64 {
        self.initial_growth
    }

    /// Terminal growth rate.
    #[must_use]
    pub fn terminal_growth(&self) -> f64 {
        self.terminal_growth
    }

    /// Decay factor `k`.
    #[must_use]
    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Growth band of the initial rate.
    #[must_use]
    pub fn category(&self) -> GrowthCategory {
        self.category
    }

    /// Growth rate `year` years after the start. Year 0 is the initial rate.
    #[must_use]
    pub fn growth_rate(&self, year: u32) -> f64 {
        let fade = (-self.decay_factor * f64::from(year)).exp();
        self.terminal_growth + (self.initial_growth - self.terminal_growth) * fade
    }

    /// Materializes `years` entries of decay diagnostics.
    ///
    /// Entry `i` reports the rate at `t = i` under year label `i + 1`, the
    /// same offset the projection uses.
    #[must_use]
    pub fn growth_profile(&self, years: u32) -> GrowthProfile {
        let yearly_rates = (0..years)
            .map(|t| {
                let rate = self.growth_rate(t);
                let decay_pct = if self.initial_growth == 0.0 {
                    0.0
                } else {
                    (1.0 - rate / self.initial_growth) * 100.0
                };
                DecayPoint {
                    year: t + 1,
                    growth_rate_pct: rate * 100.0,
                    decay_pct,
                }
            })
            .collect();

        GrowthProfile {
            initial_growth: self.initial_growth,
            terminal_growth: self.terminal_growth,
            decay_factor: self.decay_factor,
            category: self.category,
            yearly_rates,
        }
    }
}

/// One row of decay diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayPoint {
    /// Projection year label, starting at 1.
    pub year: u32,
    /// Growth rate in percent.
    pub growth_rate_pct: f64,
    /// How far the rate has fallen from the initial rate, in percent.
    pub decay_pct: f64,
}

/// Decay diagnostics for one valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProfile {
    /// Initial growth rate.
    pub initial_growth: f64,
    /// Terminal growth rate.
    pub terminal_growth: f64,
    /// Decay factor used.
    pub decay_factor: f64,
    /// Growth band of the initial rate.
    pub category: GrowthCategory,
    /// Per-year rates.
    pub yearly_rates: Vec<DecayPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rate_at_year_zero_is_initial() {
        let config = ValuationConfig::default();
        let model = GrowthDecayModel::new(0.15, 0.03, &config);

        assert_relative_eq!(model.growth_rate(0), 0.15, epsilon = 1e-12);
        assert_relative_eq!(model.decay_factor(), 0.30, epsilon = 1e-12);
        assert_eq!(model.category(), GrowthCategory::ModerateGrowth);
    }

    #[test]
    fn test_known_rate() {
        let config = ValuationConfig::default();
        let model = GrowthDecayModel::new(0.15, 0.03, &config);

        // 0.03 + 0.12 * e^-0.3
        assert_relative_eq!(model.growth_rate(1), 0.118_897_748_1, epsilon = 1e-9);
    }

    #[test]
    fn test_profile_length_follows_horizon() {
        let config = ValuationConfig::default();
        let model = GrowthDecayModel::new(0.25, 0.03, &config);

        let profile = model.growth_profile(7);
        assert_eq!(profile.yearly_rates.len(), 7);
        assert_eq!(profile.yearly_rates[0].year, 1);
        assert_relative_eq!(profile.yearly_rates[0].growth_rate_pct, 25.0, epsilon = 1e-9);
        assert_relative_eq!(profile.yearly_rates[0].decay_pct, 0.0, epsilon = 1e-9);
        assert!(profile.yearly_rates[6].decay_pct > profile.yearly_rates[5].decay_pct);
        assert_eq!(profile.category, GrowthCategory::HighGrowth);
    }

    #[test]
    fn test_profile_with_zero_initial_growth() {
        let config = ValuationConfig::default();
        let model = GrowthDecayModel::new(0.0, -0.01, &config);

        let profile = model.growth_profile(3);
        assert!(profile.yearly_rates.iter().all(|p| p.decay_pct == 0.0));
    }

    #[test]
    fn test_explicit_decay_factor() {
        let config = ValuationConfig::default();
        let model = GrowthDecayModel::new(0.30, 0.03, &config).with_decay_factor(0.1);

        assert_relative_eq!(model.decay_factor(), 0.1);
        assert_relative_eq!(
            model.growth_rate(2),
            0.03 + 0.27 * (-0.2_f64).exp(),
            epsilon = 1e-12
        );
    }

    proptest! {
        #[test]
        fn prop_starts_at_initial_and_decreases(
            terminal in -0.02_f64..0.06,
            gap in 0.001_f64..2.0,
        ) {
            let config = ValuationConfig::default();
            let initial = terminal + gap;
            let model = GrowthDecayModel::new(initial, terminal, &config);

            prop_assert!((model.growth_rate(0) - initial).abs() < 1e-12);
            for year in 0..30 {
                prop_assert!(model.growth_rate(year + 1) < model.growth_rate(year));
                prop_assert!(model.growth_rate(year + 1) > terminal);
            }
        }

        #[test]
        fn prop_converges_to_terminal(
            terminal in -0.02_f64..0.06,
            gap in 0.001_f64..2.0,
        ) {
            let config = ValuationConfig::default();
            let model = GrowthDecayModel::new(terminal + gap, terminal, &config);

            // k >= 0.1, so e^(-0.1 * 500) * 2 is far below the tolerance
            prop_assert!((model.growth_rate(500) - terminal).abs() < 1e-9);
        }
    }
}
