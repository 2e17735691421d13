//! Projection kernel shared by the calculator and the reverse solver.

use crate::discounting::PresentValueCalculator;
use crate::error::AnalyticsResult;
use crate::growth::GrowthDecayModel;

use super::result::{TerminalValueAnalysis, YearProjection};

/// Iterator over `(year, growth_rate, metric)` for years `1..=N`.
///
/// Year `t` applies the model rate at `t - 1`, so year 1 grows at the
/// initial rate.
#[derive(Debug, Clone)]
pub(crate) struct GrowthPath<'a> {
    model: &'a GrowthDecayModel,
    metric: f64,
    year: u32,
    years: u32,
}

impl<'a> GrowthPath<'a> {
    pub(crate) fn new(model: &'a GrowthDecayModel, initial_metric: f64, years: u32) -> Self {
        Self {
            model,
            metric: initial_metric,
            year: 0,
            years,
        }
    }
}

impl Iterator for GrowthPath<'_> {
    type Item = (u32, f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.year >= self.years {
            return None;
        }
        let rate = self.model.growth_rate(self.year);
        self.year += 1;
        self.metric *= 1.0 + rate;
        Some((self.year, rate, self.metric))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.years - self.year) as usize;
        (remaining, Some(remaining))
    }
}

/// Forecast years plus terminal value, on the metric's own basis.
#[derive(Debug, Clone)]
pub(crate) struct Projection {
    pub years: Vec<YearProjection>,
    pub terminal: TerminalValueAnalysis,
    pub present_value_of_cash_flows: f64,
}

impl Projection {
    pub(crate) fn aggregate_value(&self) -> f64 {
        self.present_value_of_cash_flows + self.terminal.present_value_of_terminal
    }
}

/// Projects `initial_metric` over `years` and values the remainder with
/// Gordon growth.
pub(crate) fn project(
    model: &GrowthDecayModel,
    discount: &PresentValueCalculator,
    initial_metric: f64,
    years: u32,
) -> AnalyticsResult<Projection> {
    let projections: Vec<YearProjection> = GrowthPath::new(model, initial_metric, years)
        .map(|(year, rate, metric)| YearProjection {
            year,
            metric_value: metric,
            growth_rate_pct: rate * 100.0,
            present_value: discount.present_value(metric, year),
        })
        .collect();

    let final_metric_value = projections
        .last()
        .map_or(initial_metric, |p| p.metric_value);
    let terminal_value = discount.terminal_value(final_metric_value, model.terminal_growth())?;
    let present_value_of_terminal = discount.present_value(terminal_value, years);
    let present_value_of_cash_flows = projections.iter().map(|p| p.present_value).sum();

    Ok(Projection {
        years: projections,
        terminal: TerminalValueAnalysis {
            final_metric_value,
            terminal_value,
            present_value_of_terminal,
        },
        present_value_of_cash_flows,
    })
}

/// Aggregate DCF value without materializing per-year rows.
pub(crate) fn aggregate_value(
    model: &GrowthDecayModel,
    discount: &PresentValueCalculator,
    initial_metric: f64,
    years: u32,
) -> AnalyticsResult<f64> {
    let mut pv_sum = 0.0;
    let mut final_metric = initial_metric;
    for (year, _, metric) in GrowthPath::new(model, initial_metric, years) {
        pv_sum += discount.present_value(metric, year);
        final_metric = metric;
    }
    let terminal = discount.terminal_value(final_metric, model.terminal_growth())?;
    Ok(pv_sum + discount.present_value(terminal, years))
}
