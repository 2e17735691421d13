//! Deterministic DCF calculator.

use chrono::Utc;
use intrinsic_core::{InputValidator, ValidatedInputs, ValuationConfig, ValuationParams};
use intrinsic_math::statistics::mean;
use tracing::trace;

use crate::discounting::PresentValueCalculator;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::growth::GrowthDecayModel;

use super::projection::project;
use super::result::{GrowthAnalysis, InputSummary, ProjectionResult, Valuation};

/// Runs one DCF valuation for either method.
///
/// # Example
///
/// ```rust
/// use intrinsic_analytics::prelude::*;
///
/// let config = ValuationConfig::default();
/// let params = ValuationParams::eps(5.0)
///     .with_growth_rate(0.15)
///     .with_terminal_growth_rate(0.03)
///     .with_discount_rate(0.10)
///     .with_margin_of_safety(0.5);
///
/// let result = ValuationCalculator::new(&config).calculate(&params).unwrap();
/// assert!(result.intrinsic_value() > 0.0);
/// assert_eq!(result.year_by_year_projections.len(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValuationCalculator<'a> {
    config: &'a ValuationConfig,
}

impl<'a> ValuationCalculator<'a> {
    /// Creates a calculator bound to a configuration.
    #[must_use]
    pub fn new(config: &'a ValuationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &'a ValuationConfig {
        self.config
    }

    /// Validates `params` and values them.
    ///
    /// A validation failure is returned with every violation listed.
    pub fn calculate(&self, params: &ValuationParams) -> AnalyticsResult<ProjectionResult> {
        let inputs = InputValidator::new(self.config).validate(params)?;
        self.calculate_validated(&inputs)
    }

    /// Values inputs that already passed validation.
    pub fn calculate_validated(&self, inputs: &ValidatedInputs) -> AnalyticsResult<ProjectionResult> {
        let model =
            GrowthDecayModel::new(inputs.growth_rate, inputs.terminal_growth_rate, self.config);
        let discount = PresentValueCalculator::new(inputs.discount_rate);

        let projection = project(
            &model,
            &discount,
            inputs.initial_metric(),
            inputs.projection_years,
        )?;

        let aggregate = projection.aggregate_value();
        let intrinsic_value = inputs.method.to_per_share(aggregate)?;
        if !intrinsic_value.is_finite() {
            return Err(AnalyticsError::NonFiniteValue {
                quantity: "intrinsic value".to_string(),
                value: intrinsic_value,
            });
        }
        let margin_of_safety_price = intrinsic_value * (1.0 - inputs.margin_of_safety);

        let rates: Vec<f64> = projection.years.iter().map(|p| p.growth_rate_pct).collect();
        let profile = model.growth_profile(inputs.projection_years);
        let growth_analysis = GrowthAnalysis {
            starting_growth_rate_pct: rates.first().copied().unwrap_or(0.0),
            ending_growth_rate_pct: rates.last().copied().unwrap_or(0.0),
            average_growth_rate_pct: mean(&rates),
            category: profile.category,
            decay_factor: profile.decay_factor,
            decay_analysis: profile.yearly_rates,
        };

        trace!(
            method = %inputs.method.kind(),
            growth = inputs.growth_rate,
            discount = inputs.discount_rate,
            intrinsic_value,
            "valuation complete"
        );

        Ok(ProjectionResult {
            method: inputs.method.kind(),
            inputs: InputSummary::from_inputs(inputs),
            year_by_year_projections: projection.years,
            growth_analysis,
            valuation: Valuation {
                present_value_of_cash_flows: projection.present_value_of_cash_flows,
                present_value_of_terminal: projection.terminal.present_value_of_terminal,
                intrinsic_value,
                margin_of_safety_price,
            },
            terminal_value_analysis: projection.terminal,
            calculated_at: Utc::now(),
        })
    }
}
