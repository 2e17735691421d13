//! Query-parameter parsing.
//!
//! Rates arrive as whole percentages (`growthRate=15`) and leave as
//! decimals (0.15). Omitted optional rates take fixed defaults.

use std::collections::HashMap;
use std::str::FromStr;

use intrinsic_core::{MethodKind, ValuationParams};

use crate::error::{ApiError, ApiResult};

/// Default terminal growth rate, percent.
pub const DEFAULT_TERMINAL_GROWTH_PCT: f64 = 3.0;
/// Default discount rate, percent.
pub const DEFAULT_DISCOUNT_RATE_PCT: f64 = 10.0;
/// Default margin of safety, percent.
pub const DEFAULT_MARGIN_OF_SAFETY_PCT: f64 = 50.0;
/// Default projection horizon.
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;
/// Largest trial count a request may ask for.
pub const MAX_TRIALS: usize = 100_000;

/// Raw query parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl From<HashMap<String, String>> for QueryParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl QueryParams {
    fn raw(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Fails with every absent name listed.
    pub fn require(&self, names: &[&str]) -> ApiResult<()> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| self.raw(name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::MissingParameters(missing))
        }
    }

    /// A finite number, if present.
    pub fn number(&self, name: &str) -> ApiResult<Option<f64>> {
        self.raw(name)
            .map(|v| match f64::from_str(v) {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(ApiError::InvalidParameters),
            })
            .transpose()
    }

    /// A whole percentage converted to a decimal, or the default.
    pub fn percent(&self, name: &str, default_pct: f64) -> ApiResult<f64> {
        Ok(self.number(name)?.unwrap_or(default_pct) / 100.0)
    }

    /// A non-negative integer, if present.
    pub fn integer<T: FromStr>(&self, name: &str) -> ApiResult<Option<T>> {
        self.raw(name)
            .map(|v| v.parse::<T>().map_err(|_| ApiError::InvalidParameters))
            .transpose()
    }

    /// Valuation method, EPS when omitted.
    pub fn method(&self) -> ApiResult<MethodKind> {
        self.raw("method")
            .map_or(Ok(MethodKind::Eps), |v| v.parse().map_err(|_| ApiError::InvalidParameters))
    }

    /// Names a valuation request for `method` must carry.
    pub fn required_for(method: MethodKind) -> &'static [&'static str] {
        match method {
            MethodKind::Eps => &["sharePrice", "eps", "growthRate"],
            MethodKind::Fcf => &["sharePrice", "fcf", "growthRate", "outstandingShares"],
        }
    }

    /// Builds engine parameters after checking presence and syntax.
    pub fn valuation_params(&self, method: MethodKind) -> ApiResult<ValuationParams> {
        self.require(Self::required_for(method))?;

        let mut params = ValuationParams {
            method,
            share_price: self.number("sharePrice")?,
            growth_rate: self.number("growthRate")?.map(|g| g / 100.0),
            terminal_growth_rate: Some(
                self.percent("terminalGrowthRate", DEFAULT_TERMINAL_GROWTH_PCT)?,
            ),
            discount_rate: Some(self.percent("discountRate", DEFAULT_DISCOUNT_RATE_PCT)?),
            margin_of_safety: Some(
                self.percent("marginOfSafety", DEFAULT_MARGIN_OF_SAFETY_PCT)?,
            ),
            projection_years: Some(
                self.integer("projectionYears")?
                    .unwrap_or(DEFAULT_PROJECTION_YEARS),
            ),
            ..ValuationParams::default()
        };
        match method {
            MethodKind::Eps => params.eps = self.number("eps")?,
            MethodKind::Fcf => {
                params.fcf = self.number("fcf")?;
                params.outstanding_shares = self.number("outstandingShares")?;
            }
        }
        Ok(params)
    }

    /// Trial count, capped at [`MAX_TRIALS`].
    pub fn trials(&self) -> ApiResult<Option<usize>> {
        match self.integer::<usize>("trials")? {
            Some(n) if n == 0 || n > MAX_TRIALS => Err(ApiError::InvalidParameters),
            other => Ok(other),
        }
    }
}
