//! Root-finding algorithms.
//!
//! Valuation models are monotone in their growth input, so a bracketing
//! method is enough to invert them:
//!
//! - [`bisection`]: Halves a sign-changing bracket until it is narrower than
//!   the tolerance
//!
//! # Example: Implied Growth
//!
//! ```rust
//! use intrinsic_math::solvers::{bisection, SolverConfig};
//!
//! // Five years of cash flow growing at g from 1.0, discounted at 10%
//! let value = |g: f64| {
//!     (1..=5)
//!         .map(|t| (1.0 + g).powi(t) / 1.10_f64.powi(t))
//!         .sum::<f64>()
//! };
//! let target = value(0.08);
//!
//! let config = SolverConfig::default().with_tolerance(1e-6);
//! let result = bisection(|g| value(g) - target, 0.0, 0.5, &config).unwrap();
//! assert!((result.root - 0.08).abs() < 1e-6);
//! ```

mod bisection;

pub use bisection::bisection;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on the bracket half-width, and on the residual unless
    /// `stop_on_residual` is off.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Whether a residual below the tolerance also ends the search.
    ///
    /// Turn this off when the tolerance is meant for the argument and the
    /// function's scale is unrelated to it.
    pub stop_on_residual: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stop_on_residual: true,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            stop_on_residual: true,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Stops only on the bracket width, ignoring the residual.
    #[must_use]
    pub fn bracket_only(mut self) -> Self {
        self.stop_on_residual = false;
        self
    }

    fn residual_converged(&self, residual: f64) -> bool {
        if self.stop_on_residual {
            residual.abs() < self.tolerance
        } else {
            residual == 0.0
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Width of the bracket when the solver stopped.
    pub bracket_width: f64,
}
