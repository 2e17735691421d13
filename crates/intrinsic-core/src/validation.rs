//! Input validation.
//!
//! [`InputValidator`] evaluates every rule and reports all violations in one
//! [`ValidationError`]. Callers must not assume only the first problem is
//! listed.

use crate::config::ValuationConfig;
use crate::error::{IssueCode, ValidationError, ValidationIssue};
use crate::types::{MethodKind, ValidatedInputs, ValuationInputs, ValuationMethod, ValuationParams};

/// Checks valuation inputs against financial sanity constraints.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator<'a> {
    config: &'a ValuationConfig,
}

impl<'a> InputValidator<'a> {
    /// Creates a validator bound to a configuration.
    #[must_use]
    pub fn new(config: &'a ValuationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &'a ValuationConfig {
        self.config
    }

    /// Validates raw parameters, applying defaults for the projection horizon
    /// and margin of safety.
    pub fn validate(&self, params: &ValuationParams) -> Result<ValidatedInputs, ValidationError> {
        let mut issues = Vec::new();

        for (name, value) in params.numeric_fields() {
            if let Some(v) = value {
                if !v.is_finite() {
                    issues.push(ValidationIssue::new(
                        IssueCode::NonFiniteInput,
                        format!("{name} must be a finite number"),
                    ));
                }
            }
        }

        let growth = require(&mut issues, "growthRate", params.growth_rate);
        let terminal = require(&mut issues, "terminalGrowthRate", params.terminal_growth_rate);
        let discount = require(&mut issues, "discountRate", params.discount_rate);
        let metric = require(&mut issues, params.method.metric_field(), params.metric());

        let shares = match params.method {
            MethodKind::Eps => None,
            MethodKind::Fcf => {
                if params.outstanding_shares.is_none() {
                    issues.push(ValidationIssue::new(
                        IssueCode::MissingParam,
                        "Outstanding shares are required for FCF method",
                    ));
                }
                params.outstanding_shares
            }
        };

        self.check_rates(&mut issues, growth, terminal, discount);

        if let Some(m) = metric {
            check_metric(&mut issues, params.method, m);
        }

        let projection_years = params
            .projection_years
            .unwrap_or(self.config.projection_years);
        check_projection_years(&mut issues, projection_years);

        if let Some(shares) = shares {
            check_shares(&mut issues, shares);
        }
        let margin_of_safety = params
            .margin_of_safety
            .unwrap_or(self.config.margin_of_safety);
        check_margin_of_safety(&mut issues, margin_of_safety);

        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }

        let method = match (params.method, metric, shares) {
            (MethodKind::Eps, Some(eps), _) => ValuationMethod::Eps { eps },
            (MethodKind::Fcf, Some(fcf), Some(outstanding_shares)) => ValuationMethod::Fcf {
                fcf,
                outstanding_shares,
            },
            _ => {
                return Err(ValidationError::single(
                    IssueCode::MissingParam,
                    format!("{} is required for {} method", params.method, params.method),
                ))
            }
        };

        match (growth, terminal, discount) {
            (Some(growth_rate), Some(terminal_growth_rate), Some(discount_rate)) => {
                Ok(ValidatedInputs::new(ValuationInputs {
                    method,
                    share_price: params.share_price,
                    growth_rate,
                    terminal_growth_rate,
                    discount_rate,
                    projection_years,
                    margin_of_safety,
                }))
            }
            _ => Err(ValidationError::single(
                IssueCode::MissingField,
                "Missing required rate inputs",
            )),
        }
    }

    /// Validates a complete input set drawn by a simulation.
    ///
    /// Applies the same rules as [`validate`](Self::validate) plus the
    /// terminal growth cap and discount rate floor, reported as
    /// `OUT_OF_RANGE`.
    pub fn validate_sample(
        &self,
        inputs: ValuationInputs,
    ) -> Result<ValidatedInputs, ValidationError> {
        let mut issues = Vec::new();
        let g = inputs.growth_rate;
        let tg = inputs.terminal_growth_rate;
        let r = inputs.discount_rate;

        if ![g, tg, r, inputs.initial_metric()].iter().all(|v| v.is_finite()) {
            return Err(ValidationError::single(
                IssueCode::NonFiniteInput,
                "Generated input is not a finite number",
            ));
        }

        self.check_rates(&mut issues, Some(g), Some(tg), Some(r));
        check_metric(&mut issues, inputs.method.kind(), inputs.initial_metric());
        check_projection_years(&mut issues, inputs.projection_years);

        let limits = &self.config.limits;
        if tg > limits.max_terminal_growth {
            issues.push(ValidationIssue::new(
                IssueCode::OutOfRange,
                format!(
                    "Generated input is out of range: terminal growth rate ({:.1}%) exceeds cap ({:.1}%)",
                    tg * 100.0,
                    limits.max_terminal_growth * 100.0
                ),
            ));
        }
        if r < limits.min_discount_rate {
            issues.push(ValidationIssue::new(
                IssueCode::OutOfRange,
                format!(
                    "Generated input is out of range: discount rate ({:.1}%) is below floor ({:.1}%)",
                    r * 100.0,
                    limits.min_discount_rate * 100.0
                ),
            ));
        }

        if issues.is_empty() {
            Ok(ValidatedInputs::new(inputs))
        } else {
            Err(ValidationError::new(issues))
        }
    }

    fn check_rates(
        &self,
        issues: &mut Vec<ValidationIssue>,
        growth: Option<f64>,
        terminal: Option<f64>,
        discount: Option<f64>,
    ) {
        if let (Some(g), Some(tg)) = (growth, terminal) {
            if tg >= g {
                issues.push(ValidationIssue::new(
                    IssueCode::InvalidTerminalGrowth,
                    format!(
                        "Terminal growth rate ({:.1}%) must be lower than growth rate ({:.1}%)",
                        tg * 100.0,
                        g * 100.0
                    ),
                ));
            }
        }
        if let (Some(tg), Some(r)) = (terminal, discount) {
            if tg >= r {
                issues.push(ValidationIssue::new(
                    IssueCode::InvalidDiscountRate,
                    format!(
                        "Terminal growth rate ({:.1}%) must be lower than discount rate ({:.1}%)",
                        tg * 100.0,
                        r * 100.0
                    ),
                ));
            }
        }
        if let Some(g) = growth {
            let max = self.config.limits.max_initial_growth;
            if g > max {
                issues.push(ValidationIssue::new(
                    IssueCode::HighGrowthRate,
                    format!(
                        "Initial growth rate ({:.1}%) exceeds maximum allowed ({:.1}%)",
                        g * 100.0,
                        max * 100.0
                    ),
                ));
            }
        }
    }
}

fn require(issues: &mut Vec<ValidationIssue>, name: &str, value: Option<f64>) -> Option<f64> {
    if value.is_none() {
        issues.push(ValidationIssue::new(
            IssueCode::MissingField,
            format!("Missing required field: {name}"),
        ));
    }
    value
}

fn check_metric(issues: &mut Vec<ValidationIssue>, method: MethodKind, metric: f64) {
    if metric <= 0.0 {
        let code = match method {
            MethodKind::Eps => IssueCode::InvalidEps,
            MethodKind::Fcf => IssueCode::InvalidFcf,
        };
        issues.push(ValidationIssue::new(code, format!("{method} must be positive")));
    }
}

// Non-finite values are already reported as NON_FINITE_INPUT.
fn check_shares(issues: &mut Vec<ValidationIssue>, shares: f64) {
    if shares.is_finite() && shares <= 0.0 {
        issues.push(ValidationIssue::new(
            IssueCode::InvalidShares,
            format!("Outstanding shares ({shares}) must be positive"),
        ));
    }
}

fn check_margin_of_safety(issues: &mut Vec<ValidationIssue>, margin: f64) {
    if margin.is_finite() && !(0.0..1.0).contains(&margin) {
        issues.push(ValidationIssue::new(
            IssueCode::InvalidMarginOfSafety,
            format!(
                "Margin of safety ({:.1}%) must be at least 0% and below 100%",
                margin * 100.0
            ),
        ));
    }
}

fn check_projection_years(issues: &mut Vec<ValidationIssue>, years: u32) {
    if years == 0 {
        issues.push(ValidationIssue::new(
            IssueCode::InvalidProjectionYears,
            "Projection years must be at least 1",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eps_params() -> ValuationParams {
        ValuationParams::eps(5.0)
            .with_growth_rate(0.15)
            .with_terminal_growth_rate(0.03)
            .with_discount_rate(0.10)
    }

    #[test]
    fn test_valid_eps_inputs_get_defaults() {
        let config = ValuationConfig::default();
        let inputs = InputValidator::new(&config).validate(&eps_params()).unwrap();

        assert_eq!(inputs.method, ValuationMethod::Eps { eps: 5.0 });
        assert_eq!(inputs.projection_years, 10);
        assert_eq!(inputs.margin_of_safety, 0.25);
        assert_eq!(inputs.share_price, None);
    }

    #[test]
    fn test_missing_fields_are_each_reported() {
        let config = ValuationConfig::default();
        let params = ValuationParams {
            method: MethodKind::Eps,
            ..ValuationParams::default()
        };

        let err = InputValidator::new(&config).validate(&params).unwrap_err();
        let messages = err.messages();

        assert_eq!(err.codes(), vec![IssueCode::MissingField; 4]);
        assert!(messages.contains(&"Missing required field: growthRate"));
        assert!(messages.contains(&"Missing required field: terminalGrowthRate"));
        assert!(messages.contains(&"Missing required field: discountRate"));
        assert!(messages.contains(&"Missing required field: eps"));
    }

    #[test]
    fn test_fcf_requires_shares() {
        let config = ValuationConfig::default();
        let mut params = ValuationParams::fcf(1_000.0, 10.0)
            .with_growth_rate(0.1)
            .with_terminal_growth_rate(0.02)
            .with_discount_rate(0.09);
        params.outstanding_shares = None;

        let err = InputValidator::new(&config).validate(&params).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::MissingParam]);
    }

    #[test]
    fn test_zero_metric_is_invalid() {
        let config = ValuationConfig::default();
        let mut params = eps_params();
        params.eps = Some(0.0);

        let err = InputValidator::new(&config).validate(&params).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::InvalidEps]);
        assert_eq!(err.messages(), vec!["EPS must be positive"]);
    }

    #[test]
    fn test_non_finite_input() {
        let config = ValuationConfig::default();
        let params = eps_params().with_share_price(f64::NAN);

        let err = InputValidator::new(&config).validate(&params).unwrap_err();
        assert!(err.has_code(IssueCode::NonFiniteInput));
    }

    #[test]
    fn test_zero_projection_years() {
        let config = ValuationConfig::default();
        let params = eps_params().with_projection_years(0);

        let err = InputValidator::new(&config).validate(&params).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::InvalidProjectionYears]);
    }

    #[test]
    fn test_sample_caps() {
        let config = ValuationConfig::default();
        let validator = InputValidator::new(&config);
        let inputs = validator.validate(&eps_params()).unwrap().into_inner();

        let hot_terminal = inputs.with_rates(0.15, 0.08, 0.12);
        let err = validator.validate_sample(hot_terminal).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::OutOfRange]);

        let cheap_money = inputs.with_rates(0.15, 0.02, 0.04);
        let err = validator.validate_sample(cheap_money).unwrap_err();
        assert_eq!(err.codes(), vec![IssueCode::OutOfRange]);

        let inverted = inputs.with_rates(0.02, 0.03, 0.10);
        let err = validator.validate_sample(inverted).unwrap_err();
        assert!(err.has_code(IssueCode::InvalidTerminalGrowth));

        assert!(validator.validate_sample(inputs).is_ok());
    }
}
