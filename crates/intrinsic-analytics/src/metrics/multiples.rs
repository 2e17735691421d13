//! How fast the price multiple shrinks as the metric grows.
//!
//! The multiple in year `t` is today's price over that year's projected
//! metric on the same basis (per share for EPS, company-wide for FCF).

use crate::valuation::ProjectionResult;

/// Synthetic years scanned past the horizon by [`time_to_one`].
pub const MAX_EXTENSION_YEARS: u32 = 50;

fn multiples(result: &ProjectionResult) -> Option<(f64, Vec<f64>)> {
    let market_value = result.inputs.market_value()?;
    if market_value <= 0.0 || result.inputs.initial_metric <= 0.0 {
        return None;
    }
    let yearly = result
        .year_by_year_projections
        .iter()
        .map(|p| market_value / p.metric_value)
        .collect();
    Some((market_value / result.inputs.initial_metric, yearly))
}

/// First forecast year whose multiple is at most half of today's.
///
/// Equivalently, the year the projected metric has doubled. `None` without a
/// price or when it does not happen within the horizon.
#[must_use]
pub fn half_life(result: &ProjectionResult) -> Option<u32> {
    let (start, yearly) = multiples(result)?;
    let half = start / 2.0;
    (1u32..)
        .zip(yearly)
        .find(|&(_, multiple)| multiple <= half)
        .map(|(year, _)| year)
}

/// Years until the multiple falls to 1, interpolated to one decimal.
///
/// `Some(0.0)` when the price is already at or below one year's metric. Past
/// the horizon the metric keeps compounding at the terminal growth rate for
/// up to [`MAX_EXTENSION_YEARS`]; `None` if the multiple still exceeds 1.
#[must_use]
pub fn time_to_one(result: &ProjectionResult) -> Option<f64> {
    let (start, yearly) = multiples(result)?;
    if start <= 1.0 {
        return Some(0.0);
    }

    let mut previous = start;
    let mut year = 0u32;
    for multiple in yearly {
        year += 1;
        if multiple <= 1.0 {
            return Some(crossing(year, previous, multiple));
        }
        previous = multiple;
    }

    let growth = 1.0 + result.inputs.terminal_growth_rate();
    if growth <= 1.0 {
        return None;
    }
    for _ in 0..MAX_EXTENSION_YEARS {
        year += 1;
        let multiple = previous / growth;
        if multiple <= 1.0 {
            return Some(crossing(year, previous, multiple));
        }
        previous = multiple;
    }
    None
}

/// Linear interpolation of where the multiple hits 1 between `year - 1` and
/// `year`, rounded to one decimal.
fn crossing(year: u32, before: f64, after: f64) -> f64 {
    let fraction = if before > after {
        (before - 1.0) / (before - after)
    } else {
        1.0
    };
    let t = f64::from(year - 1) + fraction;
    (t * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::ValuationCalculator;
    use approx::assert_relative_eq;
    use intrinsic_core::{ValuationConfig, ValuationParams};

    fn eps_result(price: f64, growth: f64, years: u32) -> ProjectionResult {
        let config = ValuationConfig::default();
        let params = ValuationParams::eps(1.0)
            .with_share_price(price)
            .with_growth_rate(growth)
            .with_terminal_growth_rate(0.03)
            .with_discount_rate(0.10)
            .with_projection_years(years);
        ValuationCalculator::new(&config).calculate(&params).unwrap()
    }

    #[test]
    fn test_half_life_is_doubling_year() {
        let result = eps_result(20.0, 0.30, 10);
        let year = half_life(&result).unwrap();

        let metric = |y: u32| result.year_by_year_projections[(y - 1) as usize].metric_value;
        assert!(metric(year) >= 2.0);
        assert!(year == 1 || metric(year - 1) < 2.0);
    }

    #[test]
    fn test_half_life_not_reached() {
        let result = eps_result(20.0, 0.05, 3);
        assert_eq!(half_life(&result), None);
    }

    #[test]
    fn test_time_to_one_already_there() {
        let result = eps_result(0.8, 0.15, 10);
        assert_eq!(time_to_one(&result), Some(0.0));
    }

    #[test]
    fn test_time_to_one_interpolates() {
        // EPS 1 growing 30% then fading: price 1.2 is crossed during year 1
        let result = eps_result(1.2, 0.30, 10);
        let t = time_to_one(&result).unwrap();

        // multiple goes 1.2 -> 1.2 / 1.3; crossing at (0.2) / (1.2 - 0.923) = 0.72
        assert_relative_eq!(t, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_time_to_one_extends_past_horizon() {
        let result = eps_result(3.0, 0.10, 2);
        let t = time_to_one(&result).unwrap();
        assert!(t > 2.0);
        assert!(t <= 2.0 + f64::from(MAX_EXTENSION_YEARS));
    }

    #[test]
    fn test_time_to_one_unreachable() {
        let result = eps_result(1_000.0, 0.10, 5);
        assert_eq!(time_to_one(&result), None);
    }

    #[test]
    fn test_without_price() {
        let config = ValuationConfig::default();
        let params = ValuationParams::eps(1.0)
            .with_growth_rate(0.2)
            .with_terminal_growth_rate(0.03)
            .with_discount_rate(0.1);
        let result = ValuationCalculator::new(&config).calculate(&params).unwrap();

        assert_eq!(half_life(&result), None);
        assert_eq!(time_to_one(&result), None);
    }
}
