//! Reverse DCF: the growth rate a market price implies.
//!
//! Runs the projection backwards. With the decay factor and every other
//! assumption held fixed, the DCF value is increasing in the initial growth
//! rate, so bisection over a growth bracket finds the rate whose value
//! matches the market.

use std::fmt;

use intrinsic_core::{ValuationConfig, ValuationInputs, ValuationMethod};
use intrinsic_math::solvers::{bisection, SolverConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discounting::PresentValueCalculator;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::growth::GrowthDecayModel;
use crate::valuation::projection::aggregate_value;

/// Assumptions for a reverse DCF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseDcfInputs {
    /// Method and starting metric.
    pub method: ValuationMethod,
    /// Observed price per share.
    pub market_price: f64,
    /// Terminal growth rate.
    pub terminal_growth_rate: f64,
    /// Discount rate.
    pub discount_rate: f64,
    /// Forecast horizon.
    pub projection_years: u32,
    /// Decay factor held fixed during the search.
    pub decay_factor: f64,
    /// Caller's own growth assumption, used to classify the market view.
    pub expected_growth_rate: Option<f64>,
}

impl ReverseDcfInputs {
    /// Takes the assumptions of a valuation, with the decay factor implied by
    /// its growth rate.
    #[must_use]
    pub fn from_valuation(
        inputs: &ValuationInputs,
        market_price: f64,
        config: &ValuationConfig,
    ) -> Self {
        Self {
            method: inputs.method,
            market_price,
            terminal_growth_rate: inputs.terminal_growth_rate,
            discount_rate: inputs.discount_rate,
            projection_years: inputs.projection_years,
            decay_factor: config.decay_factor(inputs.growth_rate),
            expected_growth_rate: Some(inputs.growth_rate),
        }
    }

    /// Market value on the metric's basis: price for EPS, market cap for FCF.
    #[must_use]
    pub fn target_value(&self) -> f64 {
        self.method.to_aggregate(self.market_price)
    }

    fn check(&self) -> AnalyticsResult<()> {
        let metric = self.method.initial_metric();
        if !(metric > 0.0 && metric.is_finite()) {
            return Err(AnalyticsError::InvalidInput(format!(
                "{} must be positive",
                self.method.kind()
            )));
        }
        if !(self.market_price > 0.0 && self.market_price.is_finite()) {
            return Err(AnalyticsError::InvalidInput(
                "market price must be positive".to_string(),
            ));
        }
        if let Some(shares) = self.method.outstanding_shares() {
            if !(shares > 0.0 && shares.is_finite()) {
                return Err(AnalyticsError::InvalidInput(
                    "outstanding shares must be positive".to_string(),
                ));
            }
        }
        if !(self.decay_factor.is_finite() && self.decay_factor >= 0.0) {
            return Err(AnalyticsError::InvalidInput(
                "decay factor must be finite and non-negative".to_string(),
            ));
        }
        if self.projection_years == 0 {
            return Err(AnalyticsError::InvalidInput(
                "projection years must be at least 1".to_string(),
            ));
        }
        if !self.terminal_growth_rate.is_finite() || !self.discount_rate.is_finite() {
            return Err(AnalyticsError::InvalidInput(
                "rates must be finite".to_string(),
            ));
        }
        if self.discount_rate <= self.terminal_growth_rate {
            return Err(AnalyticsError::TerminalValueDomain {
                discount_rate: self.discount_rate,
                terminal_growth_rate: self.terminal_growth_rate,
            });
        }
        Ok(())
    }
}

/// Search bracket and stopping rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseDcfConfig {
    /// Lowest growth rate searched.
    pub lower: f64,
    /// Highest growth rate searched.
    pub upper: f64,
    /// Stop once the bracket half-width is below this.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
}

impl Default for ReverseDcfConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 0.5,
            tolerance: 1e-4,
            max_iterations: 100,
        }
    }
}

impl ReverseDcfConfig {
    /// Searches growth up to 100%.
    #[must_use]
    pub fn wide() -> Self {
        Self {
            upper: 1.0,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// How the implied rate compares with the caller's expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketView {
    /// Market implies more growth than expected.
    MoreOptimistic,
    /// Market agrees with the expectation.
    InLine,
    /// Market implies less growth than expected.
    MorePessimistic,
    /// The price is covered without any growth.
    NoGrowthExpected,
}

impl fmt::Display for MarketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MarketView::MoreOptimistic => "market is more optimistic",
            MarketView::InLine => "market is in line",
            MarketView::MorePessimistic => "market is more pessimistic",
            MarketView::NoGrowthExpected => "market expects no growth",
        };
        write!(f, "{text}")
    }
}

/// Outcome of a reverse DCF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpliedGrowth {
    /// Growth rate the market price implies.
    pub implied_growth_rate: f64,
    /// Bisection iterations used.
    pub iterations: u32,
    /// Market value the search matched.
    pub target_value: f64,
    /// Caller's growth assumption, if given.
    pub expected_growth_rate: Option<f64>,
    /// Comparison against the expectation.
    pub market_view: Option<MarketView>,
}

/// Finds the initial growth rate that prices a stock at its market value.
///
/// # Example
///
/// ```rust
/// use intrinsic_analytics::prelude::*;
///
/// let config = ValuationConfig::default();
/// let inputs = ReverseDcfInputs {
///     method: ValuationMethod::Eps { eps: 5.0 },
///     market_price: 90.0,
///     terminal_growth_rate: 0.03,
///     discount_rate: 0.10,
///     projection_years: 10,
///     decay_factor: 0.3,
///     expected_growth_rate: Some(0.15),
/// };
///
/// let implied = ReverseDcfSolver::new(&config).solve(&inputs).unwrap();
/// assert!(implied.implied_growth_rate > 0.0 && implied.implied_growth_rate < 0.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReverseDcfSolver<'a> {
    config: &'a ValuationConfig,
    settings: ReverseDcfConfig,
}

impl<'a> ReverseDcfSolver<'a> {
    /// Creates a solver with the default `[0%, 50%]` bracket.
    #[must_use]
    pub fn new(config: &'a ValuationConfig) -> Self {
        Self {
            config,
            settings: ReverseDcfConfig::default(),
        }
    }

    /// Replaces the search settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ReverseDcfConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Search settings in use.
    #[must_use]
    pub fn settings(&self) -> &ReverseDcfConfig {
        &self.settings
    }

    /// DCF value on the metric's basis for initial growth `growth`.
    pub fn value_at(&self, inputs: &ReverseDcfInputs, growth: f64) -> AnalyticsResult<f64> {
        let model = GrowthDecayModel::new(growth, inputs.terminal_growth_rate, self.config)
            .with_decay_factor(inputs.decay_factor);
        let discount = PresentValueCalculator::new(inputs.discount_rate);
        aggregate_value(
            &model,
            &discount,
            inputs.method.initial_metric(),
            inputs.projection_years,
        )
    }

    /// Solves for the implied growth rate.
    ///
    /// A market value at or below the zero-growth value clamps to the lower
    /// bound. A market value above the value at the upper bound is an error.
    pub fn solve(&self, inputs: &ReverseDcfInputs) -> AnalyticsResult<ImpliedGrowth> {
        inputs.check()?;
        let ReverseDcfConfig {
            lower,
            upper,
            tolerance,
            max_iterations,
        } = self.settings;
        if !(lower < upper) || !(tolerance > 0.0) {
            return Err(AnalyticsError::Config(format!(
                "invalid growth bracket [{lower}, {upper}] with tolerance {tolerance}"
            )));
        }

        let target = inputs.target_value();
        let floor_value = self.value_at(inputs, lower)?;
        if target <= floor_value {
            debug!(target, floor_value, "market value covered at the lower growth bound");
            return Ok(self.implied(inputs, lower, 0, target));
        }

        let ceiling_value = self.value_at(inputs, upper)?;
        if target > ceiling_value {
            return Err(AnalyticsError::ImpliedGrowthOutOfRange {
                target,
                max_value: ceiling_value,
                upper_bound: upper,
            });
        }

        // Propagating a failed evaluation through bisection would hide it; the
        // inputs are already checked so the projection cannot fail inside.
        let objective = |g: f64| self.value_at(inputs, g).map_or(f64::NAN, |v| v - target);
        // The tolerance is on the growth rate. Value gaps scale with the
        // metric and say nothing about how close the rate is.
        let solver = SolverConfig::new(tolerance, max_iterations).bracket_only();
        let result = bisection(objective, lower, upper, &solver)?;

        debug!(
            implied = result.root,
            iterations = result.iterations,
            target,
            "reverse dcf solved"
        );
        Ok(self.implied(inputs, result.root, result.iterations, target))
    }

    fn implied(
        &self,
        inputs: &ReverseDcfInputs,
        rate: f64,
        iterations: u32,
        target_value: f64,
    ) -> ImpliedGrowth {
        ImpliedGrowth {
            implied_growth_rate: rate,
            iterations,
            target_value,
            expected_growth_rate: inputs.expected_growth_rate,
            market_view: self.classify(rate, inputs.expected_growth_rate),
        }
    }

    fn classify(&self, implied: f64, expected: Option<f64>) -> Option<MarketView> {
        let tolerance = self.settings.tolerance;
        if implied.abs() <= tolerance {
            return Some(MarketView::NoGrowthExpected);
        }
        let expected = expected?;
        Some(if (implied - expected).abs() <= tolerance {
            MarketView::InLine
        } else if implied > expected {
            MarketView::MoreOptimistic
        } else {
            MarketView::MorePessimistic
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::ValuationCalculator;
    use approx::assert_relative_eq;
    use intrinsic_core::ValuationParams;

    fn eps_inputs(price: f64) -> ReverseDcfInputs {
        ReverseDcfInputs {
            method: ValuationMethod::Eps { eps: 5.0 },
            market_price: price,
            terminal_growth_rate: 0.03,
            discount_rate: 0.10,
            projection_years: 10,
            decay_factor: 0.25,
            expected_growth_rate: Some(0.15),
        }
    }

    #[test]
    fn test_recovers_known_eps_growth() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);
        let price = solver.value_at(&eps_inputs(1.0), 0.12).unwrap();

        let implied = solver.solve(&eps_inputs(price)).unwrap();
        assert!((implied.implied_growth_rate - 0.12).abs() < 1e-4);
        assert_eq!(implied.market_view, Some(MarketView::MorePessimistic));
        assert!(implied.iterations > 0);
    }

    #[test]
    fn test_recovers_growth_from_forward_valuation() {
        let config = ValuationConfig::default();
        let params = ValuationParams::fcf(2_000.0, 100.0)
            .with_growth_rate(0.12)
            .with_terminal_growth_rate(0.025)
            .with_discount_rate(0.09);
        let forward = ValuationCalculator::new(&config).calculate(&params).unwrap();

        let mut inputs = eps_inputs(forward.intrinsic_value());
        inputs.method = ValuationMethod::Fcf {
            fcf: 2_000.0,
            outstanding_shares: 100.0,
        };
        inputs.terminal_growth_rate = 0.025;
        inputs.discount_rate = 0.09;
        inputs.decay_factor = config.decay_factor(0.12);
        inputs.expected_growth_rate = Some(0.12);

        let implied = ReverseDcfSolver::new(&config).solve(&inputs).unwrap();
        assert_relative_eq!(implied.implied_growth_rate, 0.12, epsilon = 1e-4);
        assert_eq!(implied.market_view, Some(MarketView::InLine));
        assert_relative_eq!(implied.target_value, forward.intrinsic_value() * 100.0);
    }

    #[test]
    fn test_recovers_growth_for_tiny_eps() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);

        for eps in [0.01, 0.001] {
            let mut inputs = eps_inputs(1.0);
            inputs.method = ValuationMethod::Eps { eps };
            inputs.market_price = solver.value_at(&inputs, 0.12).unwrap();

            let implied = solver.solve(&inputs).unwrap();
            assert!(
                (implied.implied_growth_rate - 0.12).abs() < 1e-4,
                "eps {eps}: implied {}",
                implied.implied_growth_rate
            );
            assert!(implied.iterations >= 12);
        }
    }

    #[test]
    fn test_wide_bracket_recovers_high_growth() {
        let config = ValuationConfig::default();
        let mut inputs = eps_inputs(1.0);
        inputs.method = ValuationMethod::Eps { eps: 0.05 };
        let solver = ReverseDcfSolver::new(&config);
        inputs.market_price = solver.value_at(&inputs, 0.8).unwrap();

        assert!(matches!(
            solver.solve(&inputs),
            Err(AnalyticsError::ImpliedGrowthOutOfRange { upper_bound, .. }) if upper_bound == 0.5
        ));

        let implied = solver
            .with_settings(ReverseDcfConfig::wide())
            .solve(&inputs)
            .unwrap();
        assert!((implied.implied_growth_rate - 0.8).abs() < 1e-4);
        assert_eq!(implied.market_view, Some(MarketView::MoreOptimistic));
    }

    #[test]
    fn test_clamp_boundary_at_zero_growth_value() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);
        let floor_value = solver.value_at(&eps_inputs(1.0), 0.0).unwrap();

        let at_floor = solver.solve(&eps_inputs(floor_value)).unwrap();
        assert_eq!(at_floor.implied_growth_rate, 0.0);
        assert_eq!(at_floor.iterations, 0);
        assert_eq!(at_floor.market_view, Some(MarketView::NoGrowthExpected));

        let above_floor = solver.solve(&eps_inputs(floor_value * 1.01)).unwrap();
        assert!(above_floor.implied_growth_rate > 0.0);
        assert!(above_floor.iterations > 0);
        let repriced = solver
            .value_at(&eps_inputs(1.0), above_floor.implied_growth_rate)
            .unwrap();
        assert_relative_eq!(repriced, floor_value * 1.01, max_relative = 2e-3);
    }

    #[test]
    fn test_non_positive_metric_or_shares_rejected() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);

        let mut negative_eps = eps_inputs(50.0);
        negative_eps.method = ValuationMethod::Eps { eps: -1.0 };
        assert!(matches!(
            solver.solve(&negative_eps),
            Err(AnalyticsError::InvalidInput(_))
        ));

        let mut negative_shares = eps_inputs(50.0);
        negative_shares.method = ValuationMethod::Fcf {
            fcf: 1_000.0,
            outstanding_shares: -10.0,
        };
        assert!(matches!(
            solver.solve(&negative_shares),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cheap_price_clamps_to_zero_growth() {
        let config = ValuationConfig::default();
        let implied = ReverseDcfSolver::new(&config)
            .solve(&eps_inputs(10.0))
            .unwrap();

        assert_eq!(implied.implied_growth_rate, 0.0);
        assert_eq!(implied.iterations, 0);
        assert_eq!(implied.market_view, Some(MarketView::NoGrowthExpected));
    }

    #[test]
    fn test_expensive_price_out_of_range() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);

        let err = solver.solve(&eps_inputs(10_000.0)).unwrap_err();
        assert!(matches!(err, AnalyticsError::ImpliedGrowthOutOfRange { .. }));

        // A wider bracket admits more but not everything
        let wide = solver.with_settings(ReverseDcfConfig::wide());
        assert!(wide.solve(&eps_inputs(10_000.0)).is_err());
    }

    #[test]
    fn test_value_increasing_in_growth() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);
        let inputs = eps_inputs(1.0);

        let mut previous = solver.value_at(&inputs, 0.0).unwrap();
        for step in 1..=50 {
            let value = solver.value_at(&inputs, f64::from(step) * 0.01).unwrap();
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let config = ValuationConfig::default();
        let solver = ReverseDcfSolver::new(&config);

        let mut inputs = eps_inputs(50.0);
        inputs.discount_rate = 0.02;
        assert!(matches!(
            solver.solve(&inputs),
            Err(AnalyticsError::TerminalValueDomain { .. })
        ));

        assert!(solver.solve(&eps_inputs(0.0)).is_err());
    }

    #[test]
    fn test_from_valuation() {
        let config = ValuationConfig::default();
        let inputs = ValuationInputs {
            method: ValuationMethod::Fcf {
                fcf: 100.0,
                outstanding_shares: 4.0,
            },
            share_price: Some(30.0),
            growth_rate: 0.15,
            terminal_growth_rate: 0.03,
            discount_rate: 0.10,
            projection_years: 10,
            margin_of_safety: 0.25,
        };

        let reverse = ReverseDcfInputs::from_valuation(&inputs, 30.0, &config);
        assert_relative_eq!(reverse.decay_factor, 0.30, epsilon = 1e-12);
        assert_relative_eq!(reverse.target_value(), 120.0);
        assert_eq!(reverse.expected_growth_rate, Some(0.15));
    }
}
