//! # Intrinsic Math
//!
//! Numerical utilities for the Intrinsic valuation engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finder used to invert valuation models
//! - **Statistics**: Mean, floor-index percentiles and ranges over samples
//!
//! ## Design Philosophy
//!
//! - **Explicit Failure**: Bad brackets and empty samples are reported, not hidden
//! - **No Interpolation Surprises**: Percentiles index the sorted sample directly

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, SolverConfig, SolverResult};
    pub use crate::statistics::{floor_percentile, mean, range, sorted};
}

pub use error::{MathError, MathResult};
