use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::simulations_constants::{
    MAX_PERIOD_YEARS, MAX_RETURN_RATE, MIN_PERIOD_YEARS, MIN_RETURN_RATE,
    START_YEAR_FUTURE_WINDOW, START_YEAR_PAST_WINDOW,
};
use super::simulations_errors::{Result, SimulationError};

/// One projected point of a compound-growth series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: i32,
    pub amount: Decimal,
}

/// Parameters driving a compound-growth projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParameters {
    pub initial_amount: Decimal,
    pub return_rate: Decimal,
    pub period_years: i32,
    pub start_year: i32,
    pub annual_contribution: Decimal,
}

impl ProjectionParameters {
    /// Validates the parameters against the supported ranges.
    ///
    /// `current_year` anchors the start-year window so callers can pin it
    /// (tests) or pass the wall-clock year (services).
    pub fn validate(&self, current_year: i32) -> Result<()> {
        if self.initial_amount < Decimal::ZERO {
            return Err(SimulationError::InvalidParameters(
                "Initial amount must not be negative".to_string(),
            ));
        }
        if self.annual_contribution < Decimal::ZERO {
            return Err(SimulationError::InvalidParameters(
                "Annual contribution must not be negative".to_string(),
            ));
        }
        if self.return_rate < Decimal::from(MIN_RETURN_RATE)
            || self.return_rate > Decimal::from(MAX_RETURN_RATE)
        {
            return Err(SimulationError::InvalidParameters(format!(
                "Return rate {} is outside [{}, {}]",
                self.return_rate, MIN_RETURN_RATE, MAX_RETURN_RATE
            )));
        }
        if self.period_years < MIN_PERIOD_YEARS || self.period_years > MAX_PERIOD_YEARS {
            return Err(SimulationError::InvalidParameters(format!(
                "Period of {} years is outside [{}, {}]",
                self.period_years, MIN_PERIOD_YEARS, MAX_PERIOD_YEARS
            )));
        }
        let min_year = current_year - START_YEAR_PAST_WINDOW;
        let max_year = current_year + START_YEAR_FUTURE_WINDOW;
        if self.start_year < min_year || self.start_year > max_year {
            return Err(SimulationError::InvalidParameters(format!(
                "Start year {} is outside [{}, {}]",
                self.start_year, min_year, max_year
            )));
        }
        Ok(())
    }
}

/// Computes the year-by-year projection for the given parameters.
///
/// The series has `period_years + 1` points. The first point carries the
/// initial amount untouched; every following year applies the return rate
/// to the running balance first, then adds the annual contribution.
pub fn project_series(params: &ProjectionParameters) -> Vec<ProjectionPoint> {
    let growth = Decimal::ONE + params.return_rate / Decimal::ONE_HUNDRED;

    let mut points = Vec::with_capacity(params.period_years as usize + 1);
    let mut amount = params.initial_amount;

    points.push(ProjectionPoint {
        year: params.start_year,
        amount,
    });

    for year in (params.start_year + 1)..=(params.start_year + params.period_years) {
        amount = amount * growth + params.annual_contribution;
        points.push(ProjectionPoint { year, amount });
    }

    points
}
