//! End-of-run summary.

use std::fmt;

use quant::PerformanceMetrics;
use serde::{Deserialize, Serialize};
use types::{AgentConfig, ExpertConfig, NaiveDate};

use crate::history::RunHistory;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// At least one price source ran out of observations.
    DataExhausted,
    /// A period was dated after the configured end date.
    EndDateReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::DataExhausted => write!(f, "data exhausted"),
            StopReason::EndDateReached => write!(f, "end date reached"),
        }
    }
}

/// Serializable summary of a finished (or in-progress) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub initial_wealth: f64,
    pub final_wealth: f64,
    pub agent_type: String,
    pub expert_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_args: Option<AgentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expert_args: Option<ExpertConfig>,
    pub assets: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Periods that reached the experts.
    pub periods: usize,
    /// Periods whose rewards were accrued.
    pub accrued_periods: usize,
    pub total_return: Option<f64>,
    /// `(final / initial)^(periods_per_year / periods) - 1`.
    pub annualized_return: Option<f64>,
    pub max_drawdown: f64,
    pub sharpe: Option<f64>,
    pub stop_reason: Option<StopReason>,
}

impl RunSummary {
    /// Build a summary from a run's history.
    pub fn from_history(
        history: &RunHistory,
        final_wealth: f64,
        periods_per_year: f64,
        agent_type: impl Into<String>,
        expert_type: impl Into<String>,
    ) -> Self {
        let initial_wealth = history.initial_wealth();
        let periods = history.len();
        let curve = history.wealth_curve();
        let metrics = PerformanceMetrics::from_wealth_curve(&curve, periods_per_year);

        Self {
            initial_wealth,
            final_wealth,
            agent_type: agent_type.into(),
            expert_type: expert_type.into(),
            agent_args: None,
            expert_args: None,
            assets: history.universe().iter().cloned().collect(),
            start_date: history.first_date(),
            end_date: history.last_date(),
            periods,
            accrued_periods: history.accrued_periods(),
            total_return: quant::total_return(initial_wealth, final_wealth),
            annualized_return: quant::annualized_return(
                initial_wealth,
                final_wealth,
                periods,
                periods_per_year,
            ),
            max_drawdown: metrics.map_or(0.0, |m| m.max_drawdown),
            sharpe: metrics.and_then(|m| m.sharpe),
            stop_reason: None,
        }
    }

    /// Attach the configurations the run was built from.
    pub fn with_configs(mut self, agent: Option<AgentConfig>, expert: Option<ExpertConfig>) -> Self {
        self.agent_args = agent;
        self.expert_args = expert;
        self
    }

    pub fn with_stop_reason(mut self, reason: Option<StopReason>) -> Self {
        self.stop_reason = reason;
        self
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = |d: Option<NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        let pct = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0));

        writeln!(f, "{:<20} {} / {}", "Strategy", self.agent_type, self.expert_type)?;
        writeln!(f, "{:<20} {}", "Assets", self.assets.len())?;
        writeln!(
            f,
            "{:<20} {} .. {}",
            "Dates",
            date(self.start_date),
            date(self.end_date)
        )?;
        writeln!(
            f,
            "{:<20} {} ({} accrued)",
            "Periods", self.periods, self.accrued_periods
        )?;
        writeln!(f, "{:<20} {:.6}", "Initial wealth", self.initial_wealth)?;
        writeln!(f, "{:<20} {:.6}", "Final wealth", self.final_wealth)?;
        writeln!(f, "{:<20} {}", "Total return", pct(self.total_return))?;
        writeln!(f, "{:<20} {}", "Annualized return", pct(self.annualized_return))?;
        writeln!(f, "{:<20} {:.2}%", "Max drawdown", self.max_drawdown * 100.0)?;
        match self.sharpe {
            Some(sharpe) => writeln!(f, "{:<20} {:.3}", "Sharpe", sharpe)?,
            None => writeln!(f, "{:<20} -", "Sharpe")?,
        }
        match self.stop_reason {
            Some(reason) => write!(f, "{:<20} {}", "Stopped", reason),
            None => write!(f, "{:<20} running", "Stopped"),
        }
    }
}
