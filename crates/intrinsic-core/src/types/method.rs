//! Valuation method types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Which base metric drives a valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MethodKind {
    /// Earnings per share. Values come out per share directly.
    #[default]
    Eps,
    /// Free cash flow for the whole company, divided by shares at the end.
    Fcf,
}

impl MethodKind {
    /// Name of the metric field the method reads.
    #[must_use]
    pub fn metric_field(&self) -> &'static str {
        match self {
            MethodKind::Eps => "eps",
            MethodKind::Fcf => "fcf",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MethodKind::Eps => "EPS",
            MethodKind::Fcf => "FCF",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MethodKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eps" => Ok(MethodKind::Eps),
            "fcf" => Ok(MethodKind::Fcf),
            other => Err(CoreError::UnknownMethod {
                value: other.to_string(),
            }),
        }
    }
}

/// A valuation method together with the data it needs.
///
/// One calculation path serves both variants: the method supplies the
/// starting metric and converts the aggregate present value to a per-share
/// figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "UPPERCASE", rename_all_fields = "camelCase")]
pub enum ValuationMethod {
    /// Project earnings per share.
    Eps {
        /// Current earnings per share.
        eps: f64,
    },
    /// Project company free cash flow.
    Fcf {
        /// Current free cash flow.
        fcf: f64,
        /// Shares outstanding.
        outstanding_shares: f64,
    },
}

impl ValuationMethod {
    /// Returns the fieldless method tag.
    #[must_use]
    pub fn kind(&self) -> MethodKind {
        match self {
            ValuationMethod::Eps { .. } => MethodKind::Eps,
            ValuationMethod::Fcf { .. } => MethodKind::Fcf,
        }
    }

    /// Returns the metric projected from year zero.
    #[must_use]
    pub fn initial_metric(&self) -> f64 {
        match *self {
            ValuationMethod::Eps { eps } => eps,
            ValuationMethod::Fcf { fcf, .. } => fcf,
        }
    }

    /// Returns the share count, if the method has one.
    #[must_use]
    pub fn outstanding_shares(&self) -> Option<f64> {
        match *self {
            ValuationMethod::Eps { .. } => None,
            ValuationMethod::Fcf {
                outstanding_shares, ..
            } => Some(outstanding_shares),
        }
    }

    /// Returns the same method with a different starting metric.
    #[must_use]
    pub fn with_initial_metric(self, metric: f64) -> Self {
        match self {
            ValuationMethod::Eps { .. } => ValuationMethod::Eps { eps: metric },
            ValuationMethod::Fcf {
                outstanding_shares, ..
            } => ValuationMethod::Fcf {
                fcf: metric,
                outstanding_shares,
            },
        }
    }

    /// Converts an aggregate value into a per-share value.
    ///
    /// Identity for EPS. For FCF, divides by the share count and fails
    /// rather than produce an infinite value when the count is zero.
    pub fn to_per_share(&self, aggregate: f64) -> CoreResult<f64> {
        match *self {
            ValuationMethod::Eps { .. } => Ok(aggregate),
            ValuationMethod::Fcf {
                outstanding_shares, ..
            } => {
                if outstanding_shares == 0.0 || !outstanding_shares.is_finite() {
                    return Err(CoreError::division_by_zero(format!(
                        "cannot divide value by {outstanding_shares} outstanding shares"
                    )));
                }
                Ok(aggregate / outstanding_shares)
            }
        }
    }

    /// Scales a per-share price up to the basis the metric is measured on.
    ///
    /// Identity for EPS; market capitalisation for FCF.
    #[must_use]
    pub fn to_aggregate(&self, per_share: f64) -> f64 {
        match *self {
            ValuationMethod::Eps { .. } => per_share,
            ValuationMethod::Fcf {
                outstanding_shares, ..
            } => per_share * outstanding_shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_per_share_conversion() {
        let eps = ValuationMethod::Eps { eps: 5.0 };
        assert_relative_eq!(eps.to_per_share(120.0).unwrap(), 120.0);

        let fcf = ValuationMethod::Fcf {
            fcf: 1_000.0,
            outstanding_shares: 50.0,
        };
        assert_relative_eq!(fcf.to_per_share(10_000.0).unwrap(), 200.0);
        assert_relative_eq!(fcf.to_aggregate(200.0), 10_000.0);
    }

    #[test]
    fn test_zero_shares_fails() {
        let fcf = ValuationMethod::Fcf {
            fcf: 1_000.0,
            outstanding_shares: 0.0,
        };
        assert!(matches!(
            fcf.to_per_share(10_000.0),
            Err(CoreError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_method_kind_parse() {
        assert_eq!("eps".parse::<MethodKind>().unwrap(), MethodKind::Eps);
        assert_eq!(" FCF ".parse::<MethodKind>().unwrap(), MethodKind::Fcf);
        assert!("dividends".parse::<MethodKind>().is_err());
        assert_eq!(MethodKind::Fcf.to_string(), "FCF");
    }

    #[test]
    fn test_method_serialization() {
        let fcf = ValuationMethod::Fcf {
            fcf: 100.0,
            outstanding_shares: 10.0,
        };
        let json = serde_json::to_value(fcf).unwrap();
        assert_eq!(json["method"], "FCF");
        assert_eq!(json["outstandingShares"], 10.0);

        let back: ValuationMethod = serde_json::from_value(json).unwrap();
        assert_eq!(back, fcf);
    }
}
