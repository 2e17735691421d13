//! Valuation input types.
//!
//! Rates are decimals throughout (0.15 means 15%). Conversion from whole
//! percentages happens at the CLI and HTTP boundaries.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::{MethodKind, ValuationMethod};

/// Raw valuation parameters as supplied by a caller.
///
/// Every field is optional; [`InputValidator`](crate::InputValidator)
/// reports what is missing or inconsistent and applies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationParams {
    /// Which metric to project.
    #[serde(default)]
    pub method: MethodKind,
    /// Current market price per share.
    pub share_price: Option<f64>,
    /// Earnings per share (EPS method).
    pub eps: Option<f64>,
    /// Free cash flow (FCF method).
    pub fcf: Option<f64>,
    /// First-year growth rate.
    pub growth_rate: Option<f64>,
    /// Long-run growth rate used for the terminal value.
    pub terminal_growth_rate: Option<f64>,
    /// Discount rate.
    pub discount_rate: Option<f64>,
    /// Margin of safety haircut.
    pub margin_of_safety: Option<f64>,
    /// Shares outstanding (FCF method).
    pub outstanding_shares: Option<f64>,
    /// Number of explicit projection years.
    pub projection_years: Option<u32>,
}

impl ValuationParams {
    /// Starts an EPS parameter set.
    #[must_use]
    pub fn eps(eps: f64) -> Self {
        Self {
            method: MethodKind::Eps,
            eps: Some(eps),
            ..Self::default()
        }
    }

    /// Starts an FCF parameter set.
    #[must_use]
    pub fn fcf(fcf: f64, outstanding_shares: f64) -> Self {
        Self {
            method: MethodKind::Fcf,
            fcf: Some(fcf),
            outstanding_shares: Some(outstanding_shares),
            ..Self::default()
        }
    }

    /// Sets the share price.
    #[must_use]
    pub fn with_share_price(mut self, price: f64) -> Self {
        self.share_price = Some(price);
        self
    }

    /// Sets the first-year growth rate.
    #[must_use]
    pub fn with_growth_rate(mut self, rate: f64) -> Self {
        self.growth_rate = Some(rate);
        self
    }

    /// Sets the terminal growth rate.
    #[must_use]
    pub fn with_terminal_growth_rate(mut self, rate: f64) -> Self {
        self.terminal_growth_rate = Some(rate);
        self
    }

    /// Sets the discount rate.
    #[must_use]
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = Some(rate);
        self
    }

    /// Sets the margin of safety.
    #[must_use]
    pub fn with_margin_of_safety(mut self, margin: f64) -> Self {
        self.margin_of_safety = Some(margin);
        self
    }

    /// Sets the projection horizon.
    #[must_use]
    pub fn with_projection_years(mut self, years: u32) -> Self {
        self.projection_years = Some(years);
        self
    }

    /// Returns the metric the selected method reads, if present.
    #[must_use]
    pub fn metric(&self) -> Option<f64> {
        match self.method {
            MethodKind::Eps => self.eps,
            MethodKind::Fcf => self.fcf,
        }
    }

    /// Named numeric fields, for checks applied to all of them.
    pub(crate) fn numeric_fields(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("sharePrice", self.share_price),
            ("eps", self.eps),
            ("fcf", self.fcf),
            ("growthRate", self.growth_rate),
            ("terminalGrowthRate", self.terminal_growth_rate),
            ("discountRate", self.discount_rate),
            ("marginOfSafety", self.margin_of_safety),
            ("outstandingShares", self.outstanding_shares),
        ]
    }
}

/// Complete valuation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInputs {
    /// Method and its metric.
    pub method: ValuationMethod,
    /// Current market price per share, when known.
    pub share_price: Option<f64>,
    /// First-year growth rate.
    pub growth_rate: f64,
    /// Long-run growth rate.
    pub terminal_growth_rate: f64,
    /// Discount rate.
    pub discount_rate: f64,
    /// Number of explicit projection years.
    pub projection_years: u32,
    /// Margin of safety haircut.
    pub margin_of_safety: f64,
}

impl ValuationInputs {
    /// Returns the starting metric.
    #[must_use]
    pub fn initial_metric(&self) -> f64 {
        self.method.initial_metric()
    }

    /// Returns a copy with the three rates replaced.
    #[must_use]
    pub fn with_rates(mut self, growth: f64, terminal_growth: f64, discount: f64) -> Self {
        self.growth_rate = growth;
        self.terminal_growth_rate = terminal_growth;
        self.discount_rate = discount;
        self
    }

    /// Converts back into raw parameters.
    #[must_use]
    pub fn to_params(&self) -> ValuationParams {
        ValuationParams {
            method: self.method.kind(),
            share_price: self.share_price,
            eps: match self.method {
                ValuationMethod::Eps { eps } => Some(eps),
                ValuationMethod::Fcf { .. } => None,
            },
            fcf: match self.method {
                ValuationMethod::Fcf { fcf, .. } => Some(fcf),
                ValuationMethod::Eps { .. } => None,
            },
            growth_rate: Some(self.growth_rate),
            terminal_growth_rate: Some(self.terminal_growth_rate),
            discount_rate: Some(self.discount_rate),
            margin_of_safety: Some(self.margin_of_safety),
            outstanding_shares: self.method.outstanding_shares(),
            projection_years: Some(self.projection_years),
        }
    }
}

/// Inputs that passed validation.
///
/// Only [`InputValidator`](crate::InputValidator) constructs this, so holding
/// one proves the rate ordering, growth ceiling and positive metric hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedInputs(ValuationInputs);

impl ValidatedInputs {
    pub(crate) fn new(inputs: ValuationInputs) -> Self {
        Self(inputs)
    }

    /// Returns the underlying inputs.
    #[must_use]
    pub fn inputs(&self) -> &ValuationInputs {
        &self.0
    }

    /// Consumes the wrapper.
    #[must_use]
    pub fn into_inner(self) -> ValuationInputs {
        self.0
    }
}

impl Deref for ValidatedInputs {
    type Target = ValuationInputs;

    fn deref(&self) -> &ValuationInputs {
        &self.0
    }
}
