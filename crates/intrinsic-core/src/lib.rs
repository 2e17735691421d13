//! # Intrinsic Core
//!
//! Core types, configuration, and validation for the Intrinsic valuation engine.
//!
//! This crate provides the foundational building blocks used throughout Intrinsic:
//!
//! - **Types**: The valuation method sum type, raw parameters, validated inputs
//! - **Configuration**: Growth bands, decay anchors, and rate limits
//! - **Validation**: Accumulating input validation with structured issue codes
//!
//! ## Design Philosophy
//!
//! - **Validated Construction**: Engine code only ever sees [`ValidatedInputs`]
//! - **Explicit Configuration**: [`ValuationConfig`] is passed by reference, never global
//! - **Every Violation Reported**: Validation never stops at the first problem
//!
//! ## Example
//!
//! ```rust
//! use intrinsic_core::prelude::*;
//!
//! let config = ValuationConfig::default();
//! let params = ValuationParams::eps(5.0)
//!     .with_growth_rate(0.15)
//!     .with_terminal_growth_rate(0.03)
//!     .with_discount_rate(0.10);
//!
//! let inputs = InputValidator::new(&config).validate(&params).unwrap();
//! assert_eq!(inputs.projection_years, 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod error;
pub mod types;
pub mod validation;


/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{GrowthBands, RateLimits, ValuationConfig};
    pub use crate::error::{
        CoreError, CoreResult, IssueCode, ValidationError, ValidationIssue,
    };
    pub use crate::types::{
        GrowthCategory, MethodKind, ValidatedInputs, ValuationInputs, ValuationMethod,
        ValuationParams,
    };
    pub use crate::validation::InputValidator;
}

pub use config::ValuationConfig;
pub use error::{CoreError, CoreResult, IssueCode, ValidationError, ValidationIssue};
pub use types::{
    GrowthCategory, MethodKind, ValidatedInputs, ValuationInputs, ValuationMethod,
    ValuationParams,
};
pub use validation::InputValidator;
