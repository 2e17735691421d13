//! Sample statistics.
//!
//! Percentiles here use the floor-index rule `sorted[floor(p / 100 * n)]`
//! with no interpolation between neighbours; the index is clamped to the
//! last element so `p = 100` is defined. Every function returns NaN (or
//! `None`) on an empty sample instead of panicking.

use statrs::statistics::Statistics;

/// Arithmetic mean. NaN when `values` is empty.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Returns a copy of `values` sorted ascending.
///
/// Uses IEEE total ordering, so NaNs sort to the end rather than panic.
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Floor-index percentile of an ascending sample.
///
/// `p` is in percent (`1.0` is the 1st percentile). NaN when `sorted` is
/// empty.
///
/// ```rust
/// use intrinsic_math::statistics::floor_percentile;
///
/// let sample = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// assert_eq!(floor_percentile(&sample, 50.0), 6.0);
/// assert_eq!(floor_percentile(&sample, 90.0), 10.0);
/// assert_eq!(floor_percentile(&sample, 10.0), 2.0);
/// ```
#[must_use]
pub fn floor_percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let n = sorted.len();
    let index = ((p / 100.0) * n as f64).floor().max(0.0) as usize;
    sorted[index.min(n - 1)]
}

/// Floor-index median, `sorted[floor(n / 2)]`.
#[must_use]
pub fn floor_median(sorted: &[f64]) -> f64 {
    floor_percentile(sorted, 50.0)
}

/// Smallest and largest values, or `None` for an empty sample.
#[must_use]
pub fn range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some((
        Statistics::min(values.iter()),
        Statistics::max(values.iter()),
    ))
}
