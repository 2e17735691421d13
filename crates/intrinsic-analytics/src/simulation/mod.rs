//! Monte Carlo valuation uncertainty.
//!
//! Each trial perturbs the rate assumptions, validates the draw with the
//! simulation caps and, when it passes, runs a full deterministic valuation.
//! Trials are independent and seeded from `(base_seed, trial_index)`, so a
//! seeded run gives the same summary sequentially or under rayon.
//!
//! Two switches select between the accepted variants of the method:
//!
//! - [`GrowthSampling`]: first-year growth held fixed, or drawn log-normally
//! - [`SafetyPercentile`]: 1st or 10th percentile as the margin of safety price

mod config;
mod parallel;
mod simulator;

pub use config::{GrowthSampling, SafetyPercentile, SimulationConfig};
pub use parallel::maybe_parallel_map;
pub use simulator::{trial_seed, MonteCarloSimulator, SimulationOutcome, SimulationSummary};
