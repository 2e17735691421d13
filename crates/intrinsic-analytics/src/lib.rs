//! # Intrinsic Analytics
//!
//! Valuation engine for equities.
//!
//! This crate holds all calculation logic of the Intrinsic workspace:
//! - **Growth**: Exponential decay from initial to terminal growth
//! - **Discounting**: Present value and Gordon growth terminal value
//! - **Valuation**: Deterministic DCF for the EPS and FCF methods
//! - **Simulation**: Monte Carlo over rate assumptions with percentile statistics
//! - **Reverse DCF**: Growth rate implied by a market price
//! - **Metrics**: Payback, half-life, time-to-one, FCF-for-free, ratios
//!
//! ## Architecture
//!
//! `intrinsic-analytics` depends on `intrinsic-core` for inputs, validation
//! and configuration and on `intrinsic-math` for bisection and sample
//! statistics. Nothing here performs I/O; the server and CLI crates are thin
//! callers.
//!
//! ## Usage
//!
//! ```rust
//! use intrinsic_analytics::prelude::*;
//!
//! let config = ValuationConfig::default();
//! let params = ValuationParams::fcf(1_000.0, 100.0)
//!     .with_share_price(90.0)
//!     .with_growth_rate(0.15)
//!     .with_terminal_growth_rate(0.03)
//!     .with_discount_rate(0.10);
//!
//! let result = ValuationCalculator::new(&config).calculate(&params).unwrap();
//! let ratios = FinancialRatios::from_result(&result);
//! assert!(result.intrinsic_value() > 0.0);
//! assert!(ratios.price_to_fcf.is_some());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

// ============================================================================
// MODULES
// ============================================================================

pub mod discounting;
pub mod growth;
pub mod metrics;
pub mod reverse_dcf;
pub mod simulation;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discounting::PresentValueCalculator;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::growth::{DecayPoint, GrowthDecayModel, GrowthProfile};
    pub use crate::metrics::{
        fcf_for_free, half_life, owner_earnings, owner_earnings_yield, payback_time,
        time_to_one, FinancialRatios, MetricsReport, PaybackBasis,
    };
    pub use crate::reverse_dcf::{
        ImpliedGrowth, MarketView, ReverseDcfConfig, ReverseDcfInputs, ReverseDcfSolver,
    };
    pub use crate::simulation::{
        GrowthSampling, MonteCarloSimulator, SafetyPercentile, SimulationConfig,
        SimulationOutcome, SimulationSummary,
    };
    pub use crate::valuation::{
        GrowthAnalysis, InputSummary, ProjectionResult, TerminalValueAnalysis, Valuation,
        ValuationCalculator, YearProjection,
    };

    pub use intrinsic_core::prelude::*;
}

pub use discounting::PresentValueCalculator;
pub use growth::GrowthDecayModel;
pub use metrics::MetricsReport;
pub use reverse_dcf::{ImpliedGrowth, MarketView, ReverseDcfInputs, ReverseDcfSolver};
pub use simulation::{MonteCarloSimulator, SimulationConfig, SimulationOutcome, SimulationSummary};
pub use valuation::{ProjectionResult, ValuationCalculator};
