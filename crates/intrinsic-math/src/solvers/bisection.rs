//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket and keeps the half where the function
/// changes sign. Stops when the bracket half-width drops below
/// `config.tolerance`, so the returned root is within the tolerance of a true
/// root whenever the function is continuous. A residual below the tolerance
/// also stops the search unless [`SolverConfig::bracket_only`] is set, in
/// which case only an exact zero does.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs or a root at an endpoint)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use intrinsic_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if config.tolerance.is_nan() || config.tolerance <= 0.0 {
        return Err(MathError::invalid_input("tolerance must be positive"));
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input("bracket bounds must be finite"));
    }

    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.is_nan() || f_hi.is_nan() || f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if config.residual_converged(f_lo) {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
            bracket_width: hi - lo,
        });
    }
    if config.residual_converged(f_hi) {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
            bracket_width: hi - lo,
        });
    }

    for iteration in 1..=config.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        if config.residual_converged(f_mid) || (hi - lo) / 2.0 < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
                bracket_width: hi - lo,
            });
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
