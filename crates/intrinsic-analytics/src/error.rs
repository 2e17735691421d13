//! Unified error types for the valuation engine.

use intrinsic_core::{CoreError, ValidationError};
use intrinsic_math::MathError;
use thiserror::Error;

/// Unified error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Inputs failed validation. Carries every violated rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Gordon growth is undefined unless the discount rate exceeds terminal growth.
    #[error(
        "Discount rate ({discount_rate}) must be greater than the terminal growth rate \
         ({terminal_growth_rate}) to calculate terminal value"
    )]
    TerminalValueDomain {
        /// Discount rate supplied.
        discount_rate: f64,
        /// Terminal growth rate supplied.
        terminal_growth_rate: f64,
    },

    /// Per-share conversion attempted with no shares.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// A calculation produced NaN or infinity.
    #[error("{quantity} is not finite ({value})")]
    NonFiniteValue {
        /// What was being computed.
        quantity: String,
        /// The offending value.
        value: f64,
    },

    /// The market price needs more growth than the search bracket allows.
    #[error(
        "market value {target:.2} exceeds {max_value:.2}, the value at the {upper_bound} growth ceiling"
    )]
    ImpliedGrowthOutOfRange {
        /// Value implied by the market price.
        target: f64,
        /// Model value at the upper growth bound.
        max_value: f64,
        /// Upper growth bound searched.
        upper_bound: f64,
    },

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Math/solver error.
    #[error("math error: {0}")]
    MathError(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AnalyticsError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DivisionByZero { context } => AnalyticsError::DivisionByZero(context),
            CoreError::InvalidConfig { reason } => AnalyticsError::Config(reason),
            CoreError::UnknownMethod { .. } => AnalyticsError::InvalidInput(err.to_string()),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        AnalyticsError::MathError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_core::IssueCode;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::TerminalValueDomain {
            discount_rate: 0.03,
            terminal_growth_rate: 0.05,
        };
        assert!(err.to_string().contains("terminal value"));

        let err: AnalyticsError = CoreError::division_by_zero("no shares").into();
        assert_eq!(err, AnalyticsError::DivisionByZero("no shares".to_string()));
    }

    #[test]
    fn test_validation_passes_through_verbatim() {
        let inner = ValidationError::single(IssueCode::InvalidEps, "EPS must be positive");
        let err = AnalyticsError::from(inner.clone());

        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.as_validation(), Some(&inner));
    }
}
