//! Monte Carlo simulator.

use std::time::Instant;

use intrinsic_core::{
    InputValidator, IssueCode, ValidatedInputs, ValidationError, ValuationConfig, ValuationParams,
};
use intrinsic_math::statistics::{floor_median, floor_percentile, mean, range, sorted};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::config::{GrowthSampling, SafetyPercentile, SimulationConfig};
use super::parallel::maybe_parallel_map;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::valuation::{ProjectionResult, ValuationCalculator};

/// Seed for trial `index`, derived from the run's base seed.
///
/// Each trial owns its generator, so results do not depend on scheduling.
#[must_use]
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add((index as u64).wrapping_mul(7_919))
}

/// Aggregate statistics over accepted trials.
///
/// All statistics are NaN when no trial was accepted; see
/// [`is_degenerate`](Self::is_degenerate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    /// Mean intrinsic value.
    pub mean: f64,
    /// `sorted[n / 2]`.
    pub median: f64,
    /// 1st percentile.
    pub percentile1: f64,
    /// 10th percentile.
    pub percentile10: f64,
    /// 90th percentile.
    pub percentile90: f64,
    /// The configured low percentile, written into every result.
    pub margin_of_safety_price: f64,
    /// Smallest first-year growth rate used by an accepted trial.
    pub min_growth_rate: f64,
    /// Largest first-year growth rate used by an accepted trial.
    pub max_growth_rate: f64,
    /// Trials requested.
    pub trials_requested: usize,
    /// Trials started before the time budget ran out.
    pub trials_run: usize,
    /// Trials that produced a result.
    pub trials_accepted: usize,
    /// True when the time budget cut the run short.
    pub truncated: bool,
    /// Base seed used.
    pub seed: u64,
    /// First-year growth treatment used.
    pub growth_sampling: GrowthSampling,
    /// Percentile reported as the margin of safety price.
    pub margin_of_safety_percentile: SafetyPercentile,
    /// Accepted results in trial order.
    pub results: Vec<ProjectionResult>,
}

impl SimulationSummary {
    /// True when no trial was accepted and the statistics are meaningless.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.results.is_empty() || self.mean.is_nan()
    }

    /// Accepted share of trials run.
    #[must_use]
    pub fn acceptance_rate(&self) -> f64 {
        if self.trials_run == 0 {
            0.0
        } else {
            self.trials_accepted as f64 / self.trials_run as f64
        }
    }

    /// Accepted intrinsic values in trial order.
    #[must_use]
    pub fn intrinsic_values(&self) -> Vec<f64> {
        self.results.iter().map(ProjectionResult::intrinsic_value).collect()
    }
}

/// Result of [`MonteCarloSimulator::simulate_or_fallback`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SimulationOutcome {
    /// At least one trial was accepted.
    Simulated(SimulationSummary),
    /// Every trial was rejected; a single deterministic valuation instead.
    Deterministic(Box<ProjectionResult>),
}

impl SimulationOutcome {
    /// The summary, when the simulation produced one.
    #[must_use]
    pub fn summary(&self) -> Option<&SimulationSummary> {
        match self {
            SimulationOutcome::Simulated(summary) => Some(summary),
            SimulationOutcome::Deterministic(_) => None,
        }
    }

    /// Headline intrinsic value: the simulated mean, or the deterministic value.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self {
            SimulationOutcome::Simulated(summary) => summary.mean,
            SimulationOutcome::Deterministic(result) => result.intrinsic_value(),
        }
    }
}

enum Trial {
    Accepted {
        growth_rate: f64,
        result: Box<ProjectionResult>,
    },
    Rejected,
    Skipped,
}

/// Distributions shared by every trial.
struct Sampler {
    terminal: Normal<f64>,
    discount: Normal<f64>,
    growth: Option<LogNormal<f64>>,
    base_growth: f64,
}

impl Sampler {
    fn new(inputs: &ValidatedInputs, config: &SimulationConfig) -> AnalyticsResult<Self> {
        let terminal = Normal::new(inputs.terminal_growth_rate, config.terminal_growth_std_dev)
            .map_err(|e| AnalyticsError::InvalidInput(format!("terminal growth draw: {e}")))?;
        let discount = Normal::new(inputs.discount_rate, config.discount_rate_std_dev)
            .map_err(|e| AnalyticsError::InvalidInput(format!("discount rate draw: {e}")))?;
        let growth = match config.growth_sampling {
            GrowthSampling::Fixed => None,
            GrowthSampling::LogNormal { sigma } => {
                if inputs.growth_rate <= 0.0 {
                    return Err(AnalyticsError::InvalidInput(
                        "log-normal growth sampling requires a positive growth rate".to_string(),
                    ));
                }
                Some(
                    LogNormal::new(inputs.growth_rate.ln(), sigma)
                        .map_err(|e| AnalyticsError::InvalidInput(format!("growth draw: {e}")))?,
                )
            }
        };
        Ok(Self {
            terminal,
            discount,
            growth,
            base_growth: inputs.growth_rate,
        })
    }

    /// Returns `(growth, terminal growth, discount)`.
    fn draw(&self, rng: &mut StdRng) -> (f64, f64, f64) {
        let terminal = self.terminal.sample(rng);
        let discount = self.discount.sample(rng);
        let growth = match &self.growth {
            Some(dist) => dist.sample(rng),
            None => self.base_growth,
        };
        (growth, terminal, discount)
    }
}

/// Drives the deterministic calculator with perturbed rate assumptions.
///
/// Terminal growth and discount rate are drawn from normals centred on the
/// caller's values. A draw that fails validation is dropped and the run
/// continues.
///
/// # Example
///
/// ```rust
/// use intrinsic_analytics::prelude::*;
///
/// let valuation = ValuationConfig::default();
/// let simulation = SimulationConfig::sequential().with_trials(200).with_seed(42);
/// let params = ValuationParams::eps(5.0)
///     .with_growth_rate(0.15)
///     .with_terminal_growth_rate(0.03)
///     .with_discount_rate(0.10);
///
/// let summary = MonteCarloSimulator::new(&valuation, &simulation)
///     .simulate(&params)
///     .unwrap();
/// assert!(summary.percentile1 <= summary.median);
/// assert!(summary.median <= summary.percentile90);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloSimulator<'a> {
    config: &'a ValuationConfig,
    simulation: &'a SimulationConfig,
}

impl<'a> MonteCarloSimulator<'a> {
    /// Creates a simulator.
    #[must_use]
    pub fn new(config: &'a ValuationConfig, simulation: &'a SimulationConfig) -> Self {
        Self { config, simulation }
    }

    /// Returns the simulation settings.
    #[must_use]
    pub fn simulation_config(&self) -> &'a SimulationConfig {
        self.simulation
    }

    /// Validates the caller's parameters and runs the simulation.
    pub fn simulate(&self, params: &ValuationParams) -> AnalyticsResult<SimulationSummary> {
        if params.metric().is_none() {
            return Err(ValidationError::single(
                IssueCode::MissingParam,
                format!("{} is required for {} method", params.method, params.method),
            )
            .into());
        }
        let inputs = InputValidator::new(self.config).validate(params)?;
        self.simulate_validated(&inputs)
    }

    /// Runs the simulation around already validated inputs.
    pub fn simulate_validated(&self, inputs: &ValidatedInputs) -> AnalyticsResult<SimulationSummary> {
        self.simulation.validate().map_err(AnalyticsError::Config)?;
        let sampler = Sampler::new(inputs, self.simulation)?;

        let seed = self.simulation.seed.unwrap_or_else(rand::random);
        let deadline = self
            .simulation
            .time_budget()
            .and_then(|budget| Instant::now().checked_add(budget));

        let trials: Vec<usize> = (0..self.simulation.trials).collect();
        let outcomes = maybe_parallel_map(&trials, self.simulation, |&index| {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Trial::Skipped;
            }
            self.run_trial(inputs, &sampler, trial_seed(seed, index), index)
        });

        let trials_run = outcomes
            .iter()
            .filter(|t| !matches!(t, Trial::Skipped))
            .count();
        let mut growth_rates = Vec::new();
        let mut results = Vec::new();
        for outcome in outcomes {
            if let Trial::Accepted {
                growth_rate,
                result,
            } = outcome
            {
                growth_rates.push(growth_rate);
                results.push(*result);
            }
        }

        let summary = self.summarize(results, &growth_rates, seed, trials_run);
        debug!(
            requested = summary.trials_requested,
            run = summary.trials_run,
            accepted = summary.trials_accepted,
            mean = summary.mean,
            median = summary.median,
            truncated = summary.truncated,
            "simulation complete"
        );
        Ok(summary)
    }

    /// Runs the simulation, falling back to one deterministic valuation when
    /// every trial is rejected.
    pub fn simulate_or_fallback(&self, params: &ValuationParams) -> AnalyticsResult<SimulationOutcome> {
        let summary = self.simulate(params)?;
        if !summary.is_degenerate() {
            return Ok(SimulationOutcome::Simulated(summary));
        }

        warn!(
            trials = summary.trials_run,
            "no simulated trial was accepted, using the deterministic valuation"
        );
        let result = ValuationCalculator::new(self.config).calculate(params)?;
        Ok(SimulationOutcome::Deterministic(Box::new(result)))
    }

    fn run_trial(
        &self,
        inputs: &ValidatedInputs,
        sampler: &Sampler,
        seed: u64,
        index: usize,
    ) -> Trial {
        let mut rng = StdRng::seed_from_u64(seed);
        let validator = InputValidator::new(self.config);
        let calculator = ValuationCalculator::new(self.config);

        for _ in 0..self.simulation.max_draws_per_trial {
            let (growth, terminal, discount) = sampler.draw(&mut rng);
            let candidate = inputs.inputs().with_rates(growth, terminal, discount);

            let sample = match validator.validate_sample(candidate) {
                Ok(sample) => sample,
                Err(err) => {
                    trace!(trial = index, %err, "draw rejected");
                    continue;
                }
            };
            match calculator.calculate_validated(&sample) {
                Ok(result) => {
                    return Trial::Accepted {
                        growth_rate: growth,
                        result: Box::new(result),
                    }
                }
                Err(err) => trace!(trial = index, %err, "draw failed to value"),
            }
        }
        Trial::Rejected
    }

    fn summarize(
        &self,
        mut results: Vec<ProjectionResult>,
        growth_rates: &[f64],
        seed: u64,
        trials_run: usize,
    ) -> SimulationSummary {
        let values: Vec<f64> = results.iter().map(ProjectionResult::intrinsic_value).collect();
        let ordered = sorted(&values);

        let percentile = self.simulation.margin_of_safety_percentile;
        let margin_of_safety_price = floor_percentile(&ordered, percentile.percentile());
        for result in &mut results {
            result.valuation.margin_of_safety_price = margin_of_safety_price;
        }

        let (min_growth_rate, max_growth_rate) = range(growth_rates).unwrap_or((f64::NAN, f64::NAN));

        SimulationSummary {
            mean: mean(&values),
            median: floor_median(&ordered),
            percentile1: floor_percentile(&ordered, 1.0),
            percentile10: floor_percentile(&ordered, 10.0),
            percentile90: floor_percentile(&ordered, 90.0),
            margin_of_safety_price,
            min_growth_rate,
            max_growth_rate,
            trials_requested: self.simulation.trials,
            trials_run,
            trials_accepted: results.len(),
            truncated: trials_run < self.simulation.trials,
            seed,
            growth_sampling: self.simulation.growth_sampling,
            margin_of_safety_percentile: percentile,
            results,
        }
    }
}
