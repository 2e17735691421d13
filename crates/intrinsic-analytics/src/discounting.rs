//! Present value and terminal value.

use crate::error::{AnalyticsError, AnalyticsResult};

/// Discounts future values at a fixed annual rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentValueCalculator {
    discount_rate: f64,
}

impl PresentValueCalculator {
    /// Creates a calculator for `discount_rate` (decimal).
    #[must_use]
    pub fn new(discount_rate: f64) -> Self {
        Self { discount_rate }
    }

    /// The annual discount rate.
    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Discount factor `1 / (1 + r)^year`.
    #[must_use]
    pub fn discount_factor(&self, year: u32) -> f64 {
        1.0 / (1.0 + self.discount_rate).powf(f64::from(year))
    }

    /// Present value of `future_value` received `year` years from now.
    #[must_use]
    pub fn present_value(&self, future_value: f64, year: u32) -> f64 {
        future_value / (1.0 + self.discount_rate).powf(f64::from(year))
    }

    /// Gordon growth value of everything after the final projected year.
    ///
    /// ```text
    /// TV = final * (1 + g) / (r - g)
    /// ```
    ///
    /// Fails when `r <= g` instead of returning an infinite or negative
    /// value. The check does not rely on prior validation.
    pub fn terminal_value(
        &self,
        final_value: f64,
        terminal_growth_rate: f64,
    ) -> AnalyticsResult<f64> {
        if self.discount_rate <= terminal_growth_rate || self.discount_rate.is_nan() {
            return Err(AnalyticsError::TerminalValueDomain {
                discount_rate: self.discount_rate,
                terminal_growth_rate,
            });
        }
        Ok(final_value * (1.0 + terminal_growth_rate) / (self.discount_rate - terminal_growth_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_present_value() {
        let pv = PresentValueCalculator::new(0.10);

        assert_relative_eq!(pv.present_value(110.0, 1), 100.0, epsilon = 1e-10);
        assert_relative_eq!(pv.present_value(121.0, 2), 100.0, epsilon = 1e-10);
        assert_relative_eq!(pv.present_value(50.0, 0), 50.0);
        assert_relative_eq!(pv.discount_factor(2) * 121.0, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_terminal_value() {
        let pv = PresentValueCalculator::new(0.10);

        // 10 * 1.03 / 0.07
        let tv = pv.terminal_value(10.0, 0.03).unwrap();
        assert_relative_eq!(tv, 147.142_857_142_857, epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_value_domain() {
        let pv = PresentValueCalculator::new(0.05);

        assert!(matches!(
            pv.terminal_value(10.0, 0.05),
            Err(AnalyticsError::TerminalValueDomain { .. })
        ));
        assert!(matches!(
            pv.terminal_value(10.0, 0.08),
            Err(AnalyticsError::TerminalValueDomain { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_present_value_decreasing_in_rate_and_year(
            value in 0.01_f64..1e9,
            rate in 0.0_f64..0.5,
            bump in 0.001_f64..0.5,
            year in 1u32..60,
        ) {
            let lower = PresentValueCalculator::new(rate);
            let higher = PresentValueCalculator::new(rate + bump);

            prop_assert!(higher.present_value(value, year) < lower.present_value(value, year));
            prop_assert!(lower.present_value(value, year + 1) < lower.present_value(value, year));
        }

        #[test]
        fn prop_terminal_value_finite_and_positive(
            final_value in 0.01_f64..1e9,
            terminal in -0.05_f64..0.10,
            spread in 0.001_f64..0.3,
        ) {
            let pv = PresentValueCalculator::new(terminal + spread);
            let tv = pv.terminal_value(final_value, terminal).unwrap();

            prop_assert!(tv.is_finite());
            prop_assert!(tv > 0.0);
        }

        #[test]
        fn prop_terminal_value_rejects_inverted_rates(
            rate in -0.05_f64..0.2,
            excess in 0.0_f64..0.2,
        ) {
            let pv = PresentValueCalculator::new(rate);
            prop_assert!(pv.terminal_value(1.0, rate + excess).is_err());
        }
    }
}
