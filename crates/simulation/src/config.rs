//! Simulation configuration options.

use serde::{Deserialize, Serialize};
use types::{NaiveDate, PERIODS_PER_YEAR};

use crate::error::{Result, SimulationError};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Periods dated before this are read and discarded.
    pub start_date: Option<NaiveDate>,

    /// The run stops at the first period dated after this.
    pub end_date: Option<NaiveDate>,

    /// Wealth at the start of the run.
    pub initial_wealth: f64,

    /// Used to annualize returns in the run summary.
    pub periods_per_year: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            initial_wealth: 1.0,
            periods_per_year: PERIODS_PER_YEAR,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration bounded by `[start, end]`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    /// Set the first date to simulate.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the last date to simulate.
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Set the starting wealth.
    pub fn with_initial_wealth(mut self, wealth: f64) -> Self {
        self.initial_wealth = wealth;
        self
    }

    /// Set the annualization factor.
    pub fn with_periods_per_year(mut self, periods: f64) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Whether `date` falls after the configured end.
    pub fn is_past_end(&self, date: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| date > end)
    }

    /// Whether `date` falls before the configured start.
    pub fn is_before_start(&self, date: NaiveDate) -> bool {
        self.start_date.is_some_and(|start| date < start)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_wealth.is_finite() && self.initial_wealth > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "initial wealth must be positive and finite, got {}",
                self.initial_wealth
            )));
        }
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "periods per year must be positive, got {}",
                self.periods_per_year
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(SimulationError::InvalidConfig(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }
        Ok(())
    }
}
