//! Error types for the Intrinsic library.
//!
//! Two families live here: [`CoreError`] for structural failures (bad
//! configuration, unknown method tags, per-share conversion) and
//! [`ValidationError`], the aggregate carrying every rule an input set broke.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Configuration values are inconsistent.
    #[error("Configuration error: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Division by zero while converting an aggregate to a per-share value.
    #[error("Division by zero: {context}")]
    DivisionByZero {
        /// What was being divided.
        context: String,
    },

    /// A method tag that is neither EPS nor FCF.
    #[error("Unknown valuation method: {value}")]
    UnknownMethod {
        /// The tag that failed to parse.
        value: String,
    },
}

impl CoreError {
    /// Creates a configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }
}

/// Machine-readable code attached to each validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// A required input is absent.
    MissingField,
    /// Terminal growth is not below the initial growth rate.
    InvalidTerminalGrowth,
    /// Terminal growth is not below the discount rate.
    InvalidDiscountRate,
    /// Initial growth exceeds the configured ceiling.
    HighGrowthRate,
    /// EPS is zero or negative.
    InvalidEps,
    /// FCF is zero or negative.
    InvalidFcf,
    /// A sampled Monte Carlo input fell outside the configured caps.
    OutOfRange,
    /// A method-specific parameter is missing.
    MissingParam,
    /// The projection horizon is zero years.
    InvalidProjectionYears,
    /// A supplied number is NaN or infinite.
    NonFiniteInput,
    /// Outstanding shares are zero or negative.
    InvalidShares,
    /// Margin of safety is outside `[0, 1)`.
    InvalidMarginOfSafety,
}

impl IssueCode {
    /// Returns the wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingField => "MISSING_FIELD",
            IssueCode::InvalidTerminalGrowth => "INVALID_TERMINAL_GROWTH",
            IssueCode::InvalidDiscountRate => "INVALID_DISCOUNT_RATE",
            IssueCode::HighGrowthRate => "HIGH_GROWTH_RATE",
            IssueCode::InvalidEps => "INVALID_EPS",
            IssueCode::InvalidFcf => "INVALID_FCF",
            IssueCode::OutOfRange => "OUT_OF_RANGE",
            IssueCode::MissingParam => "MISSING_PARAM",
            IssueCode::InvalidProjectionYears => "INVALID_PROJECTION_YEARS",
            IssueCode::NonFiniteInput => "NON_FINITE_INPUT",
            IssueCode::InvalidShares => "INVALID_SHARES",
            IssueCode::InvalidMarginOfSafety => "INVALID_MARGIN_OF_SAFETY",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single broken validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Machine-readable code.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Aggregate validation failure.
///
/// Carries every issue found in one pass over the inputs, in rule order.
/// Displays as `Validation failed: <message>, <message>, ...`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Validation failed: {}", join_messages(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Creates an aggregate error from a list of issues.
    #[must_use]
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Creates an aggregate error holding a single issue.
    #[must_use]
    pub fn single(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(vec![ValidationIssue::new(code, message)])
    }

    /// Returns all issues.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Consumes the error, returning the issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Returns the codes of all issues, in order.
    #[must_use]
    pub fn codes(&self) -> Vec<IssueCode> {
        self.issues.iter().map(|issue| issue.code).collect()
    }

    /// Returns true if any issue carries `code`.
    #[must_use]
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    /// Returns the messages of all issues, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.message.as_str()).collect()
    }
}

fn join_messages(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::division_by_zero("outstanding shares is zero");
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn test_validation_error_display_joins_messages() {
        let err = ValidationError::new(vec![
            ValidationIssue::new(IssueCode::InvalidEps, "EPS must be positive"),
            ValidationIssue::new(IssueCode::MissingField, "Missing required field: discountRate"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: EPS must be positive, Missing required field: discountRate"
        );
        assert!(err.has_code(IssueCode::InvalidEps));
        assert!(!err.has_code(IssueCode::OutOfRange));
        assert_eq!(err.codes(), vec![IssueCode::InvalidEps, IssueCode::MissingField]);
    }

    #[test]
    fn test_issue_code_wire_format() {
        let json = serde_json::to_string(&IssueCode::InvalidTerminalGrowth).unwrap();
        assert_eq!(json, "\"INVALID_TERMINAL_GROWTH\"");
        assert_eq!(IssueCode::HighGrowthRate.to_string(), "HIGH_GROWTH_RATE");
    }
}
