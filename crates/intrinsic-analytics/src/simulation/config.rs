//! Monte Carlo simulation configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the first-year growth rate is treated across trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthSampling {
    /// Every trial uses the caller's growth rate.
    #[default]
    Fixed,
    /// Growth is drawn from a log-normal centred at `ln(growth)`.
    LogNormal {
        /// Standard deviation in log space.
        sigma: f64,
    },
}

impl GrowthSampling {
    /// Log-normal sampling with the customary 0.2 log-space spread.
    #[must_use]
    pub fn log_normal() -> Self {
        GrowthSampling::LogNormal { sigma: 0.2 }
    }
}

impl fmt::Display for GrowthSampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthSampling::Fixed => write!(f, "fixed"),
            GrowthSampling::LogNormal { sigma } => write!(f, "log-normal (sigma {sigma})"),
        }
    }
}

/// Low percentile reported as the margin of safety price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SafetyPercentile {
    /// 1st percentile.
    #[default]
    P1,
    /// 10th percentile.
    P10,
}

impl SafetyPercentile {
    /// The percentile in percent.
    #[must_use]
    pub fn percentile(&self) -> f64 {
        match self {
            SafetyPercentile::P1 => 1.0,
            SafetyPercentile::P10 => 10.0,
        }
    }
}

impl fmt::Display for SafetyPercentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyPercentile::P1 => write!(f, "p1"),
            SafetyPercentile::P10 => write!(f, "p10"),
        }
    }
}

/// Configuration for a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of trials.
    pub trials: usize,

    /// Base seed. When absent a random seed is drawn and reported back.
    pub seed: Option<u64>,

    /// Absolute standard deviation of the terminal growth draw.
    pub terminal_growth_std_dev: f64,

    /// Absolute standard deviation of the discount rate draw.
    pub discount_rate_std_dev: f64,

    /// First-year growth treatment.
    pub growth_sampling: GrowthSampling,

    /// Percentile that replaces every result's margin of safety price.
    pub margin_of_safety_percentile: SafetyPercentile,

    /// Draws attempted per trial before the trial counts as rejected.
    pub max_draws_per_trial: u32,

    /// Wall-clock budget in milliseconds, checked before each trial.
    pub time_budget_ms: Option<u64>,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum trial count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 2_000,
            seed: None,
            terminal_growth_std_dev: 0.01,
            discount_rate_std_dev: 0.01,
            growth_sampling: GrowthSampling::Fixed,
            margin_of_safety_percentile: SafetyPercentile::P1,
            max_draws_per_trial: 1,
            time_budget_ms: None,
            parallel: true,
            parallel_threshold: 500,
        }
    }
}

impl SimulationConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always runs sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the number of trials.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the first-year growth treatment.
    #[must_use]
    pub fn with_growth_sampling(mut self, sampling: GrowthSampling) -> Self {
        self.growth_sampling = sampling;
        self
    }

    /// Sets the margin of safety percentile.
    #[must_use]
    pub fn with_margin_of_safety_percentile(mut self, percentile: SafetyPercentile) -> Self {
        self.margin_of_safety_percentile = percentile;
        self
    }

    /// Sets the rate standard deviations.
    #[must_use]
    pub fn with_std_devs(mut self, terminal_growth: f64, discount_rate: f64) -> Self {
        self.terminal_growth_std_dev = terminal_growth;
        self.discount_rate_std_dev = discount_rate;
        self
    }

    /// Sets the draws per trial.
    #[must_use]
    pub fn with_max_draws_per_trial(mut self, draws: u32) -> Self {
        self.max_draws_per_trial = draws;
        self
    }

    /// Sets the wall-clock budget.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The wall-clock budget, if any.
    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.trials == 0 {
            return Err("at least one trial is required".into());
        }
        if !(self.terminal_growth_std_dev >= 0.0 && self.terminal_growth_std_dev.is_finite()) {
            return Err("terminal growth standard deviation must be finite and non-negative".into());
        }
        if !(self.discount_rate_std_dev >= 0.0 && self.discount_rate_std_dev.is_finite()) {
            return Err("discount rate standard deviation must be finite and non-negative".into());
        }
        if let GrowthSampling::LogNormal { sigma } = self.growth_sampling {
            if !(sigma >= 0.0 && sigma.is_finite()) {
                return Err("log-normal sigma must be finite and non-negative".into());
            }
        }
        if self.max_draws_per_trial == 0 {
            return Err("at least one draw per trial is required".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.trials, 2_000);
        assert_eq!(config.growth_sampling, GrowthSampling::Fixed);
        assert_eq!(config.margin_of_safety_percentile.percentile(), 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::sequential()
            .with_trials(50)
            .with_seed(7)
            .with_growth_sampling(GrowthSampling::log_normal())
            .with_margin_of_safety_percentile(SafetyPercentile::P10)
            .with_time_budget(Duration::from_millis(250));

        assert!(!config.parallel);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.time_budget(), Some(Duration::from_millis(250)));
        assert_eq!(config.margin_of_safety_percentile.percentile(), 10.0);
    }

    #[test]
    fn test_parallel_threshold() {
        let config = SimulationConfig::default().with_threshold(10);
        assert!(!config.should_parallelize(5));

        #[cfg(feature = "parallel")]
        assert!(config.should_parallelize(100));
    }

    #[test]
    fn test_invalid() {
        assert!(SimulationConfig::default()
            .with_std_devs(-0.01, 0.01)
            .validate()
            .is_err());
        assert!(SimulationConfig::default()
            .with_max_draws_per_trial(0)
            .validate()
            .is_err());
        assert_eq!(
            SimulationConfig::default().with_trials(0).validate(),
            Err("at least one trial is required".to_string())
        );
        assert!(SimulationConfig::default().with_trials(1).validate().is_ok());
    }

    #[test]
    fn test_zero_trials_in_toml_rejected() {
        let config: SimulationConfig = toml::from_str("trials = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: SimulationConfig = toml::from_str(
            r#"
            trials = 500
            margin_of_safety_percentile = "p10"

            [growth_sampling]
            kind = "log_normal"
            sigma = 0.3
            "#,
        )
        .unwrap();

        assert_eq!(config.trials, 500);
        assert_eq!(config.margin_of_safety_percentile, SafetyPercentile::P10);
        assert_eq!(config.growth_sampling, GrowthSampling::LogNormal { sigma: 0.3 });
        assert_eq!(config.discount_rate_std_dev, 0.01);
    }
}
