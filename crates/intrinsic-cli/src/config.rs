//! Engine settings file.

use std::path::Path;

use intrinsic_analytics::SimulationConfig;
use intrinsic_core::ValuationConfig;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Settings read from `--config`; every table is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Valuation engine settings
    pub valuation: ValuationConfig,
    /// Monte Carlo defaults
    pub simulation: SimulationConfig,
}

impl Settings {
    /// Parses and checks TOML settings.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        settings
            .valuation
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        settings.simulation.validate().map_err(CliError::Config)?;
        Ok(settings)
    }
}

/// Loads settings from `path`, or defaults when none is given.
pub fn load(path: Option<&Path>) -> CliResult<Settings> {
    match path {
        Some(path) => Settings::from_toml(&std::fs::read_to_string(path)?),
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_toml("[simulation]\ntrials = 300\n").unwrap();
        assert_eq!(settings.simulation.trials, 300);
        assert_eq!(settings.valuation, ValuationConfig::default());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Settings::from_toml("[simulation]\nmax_draws_per_trial = 0\n"),
            Err(CliError::Config(_))
        ));
        assert!(Settings::from_toml("valuation = 3").is_err());
    }
}
