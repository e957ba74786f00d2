//! Simulation runner: the period-by-period wealth loop.
//!
//! # Period Cycle
//!
//! ```text
//! read one observation per source ─┬─ any exhausted ──> Stopped(DataExhausted)
//!                                  ├─ date > end     ──> Stopped(EndDateReached)
//!                                  ├─ date < start   ──> discard, stay Running
//!                                  ▼
//! feed experts -> log period -> agent.update() -> accrue rewards -> reallocate
//! ```
//!
//! All sources are read before any expert is fed, so an exhausted source
//! never leaves the panel with a partially applied period.
//!
//! # Accounting
//!
//! `portfolio` holds the dollar allocation per asset. When rewards are ready
//! it is multiplied element-wise by the rewards, wealth becomes its sum, and
//! the portfolio is reset to `weights * wealth` with the agent's new weights.

use std::sync::Arc;

use agents::{Agent, rewards_ready};
use tracing::{debug, info, warn};
use types::{
    AgentConfig, AssetUniverse, ExpertConfig, NaiveDate, Observation, ObservationError, Period,
    validate_price,
};

use crate::config::SimulationConfig;
use crate::error::{FeedError, Result, SimulationError};
use crate::factory::{build_agent, build_expert_panel};
use crate::feed::PriceSource;
use crate::history::{PeriodRecord, RunHistory};
use crate::hooks::{HookRunner, PeriodSnapshot, RunStart, SimulationHook};
use crate::summary::{RunSummary, StopReason};

/// Lifecycle of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped(StopReason),
}

impl RunState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, RunState::Stopped(_))
    }
}

/// The main simulation runner.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    sources: Vec<Box<dyn PriceSource>>,
    agent: Box<dyn Agent>,
    state: RunState,
    started: bool,
    /// Observations read from each source so far.
    rows_read: u64,
    wealth: f64,
    portfolio: Vec<f64>,
    current_date: Option<NaiveDate>,
    period: Period,
    history: RunHistory,
    hooks: HookRunner,
    agent_config: Option<AgentConfig>,
    expert_config: Option<ExpertConfig>,
}

impl Simulation {
    /// Create a simulation over `sources` driving `agent`.
    ///
    /// Sources must match the agent's universe one-to-one and in order.
    pub fn new(
        sources: Vec<Box<dyn PriceSource>>,
        agent: Box<dyn Agent>,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_alignment(&sources, agent.universe())?;

        let wealth = config.initial_wealth;
        let portfolio = agent.weights().iter().map(|w| w * wealth).collect();
        let history = RunHistory::new(agent.universe().clone(), wealth);

        Ok(Self {
            config,
            sources,
            agent,
            state: RunState::Running,
            started: false,
            rows_read: 0,
            wealth,
            portfolio,
            current_date: None,
            period: Period::ZERO,
            history,
            hooks: HookRunner::new(),
            agent_config: None,
            expert_config: None,
        })
    }

    /// Build experts and agent from configs, with one expert per source.
    ///
    /// The universe is taken from the sources' order.
    pub fn from_configs(
        sources: Vec<Box<dyn PriceSource>>,
        expert: &ExpertConfig,
        agent: &AgentConfig,
        config: SimulationConfig,
    ) -> Result<Self> {
        let universe = AssetUniverse::new(sources.iter().map(|s| s.asset().to_string()))
            .map_err(experts::ExpertError::from)?;
        let panel = build_expert_panel(&universe, expert)?;
        let built = build_agent(panel, agent)?;

        let mut sim = Self::new(sources, built, config)?;
        sim.agent_config = Some(agent.clone());
        sim.expert_config = Some(expert.clone());
        Ok(sim)
    }

    /// Register an observer.
    pub fn add_hook(&mut self, hook: Arc<dyn SimulationHook>) {
        self.hooks.add(hook);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn agent(&self) -> &dyn Agent {
        self.agent.as_ref()
    }

    pub fn universe(&self) -> &AssetUniverse {
        self.agent.universe()
    }

    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    pub fn initial_wealth(&self) -> f64 {
        self.config.initial_wealth
    }

    /// Dollar allocation per asset, in universe order.
    pub fn portfolio(&self) -> &[f64] {
        &self.portfolio
    }

    /// Date of the last simulated period.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    /// Number of periods simulated so far.
    pub fn period(&self) -> Period {
        self.period
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        let expert_type = match &self.expert_config {
            Some(config) => config.name(),
            None => self
                .agent
                .experts()
                .get_at(0)
                .map_or("Expert", |e| e.kind()),
        };
        let stop_reason = match self.state {
            RunState::Stopped(reason) => Some(reason),
            RunState::Running => None,
        };

        RunSummary::from_history(
            &self.history,
            self.wealth,
            self.config.periods_per_year,
            self.agent.name(),
            expert_type,
        )
        .with_configs(self.agent_config.clone(), self.expert_config.clone())
        .with_stop_reason(stop_reason)
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Advance by one period.
    ///
    /// Returns the state after the step. Stepping a stopped simulation is a
    /// no-op. Feed errors are fatal and leave the state unchanged.
    pub fn step(&mut self) -> Result<RunState> {
        if self.state.is_stopped() {
            return Ok(self.state);
        }
        if !self.started {
            self.start();
        }

        let Some(observations) = self.read_period()? else {
            return Ok(self.stop(StopReason::DataExhausted));
        };
        let date = self.period_date(&observations);

        if self.config.is_past_end(date) {
            return Ok(self.stop(StopReason::EndDateReached));
        }
        if self.config.is_before_start(date) {
            debug!(%date, "before start date, discarding period");
            return Ok(self.state);
        }

        let prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
        self.agent.experts_mut().update_all(&prices)?;

        let weights_before = self.agent.weights().to_vec();
        let wealth_before = self.wealth;

        let outcome = self.agent.update();
        let accrued = self.accrue();

        debug!(
            period = %self.period,
            %date,
            ?outcome,
            wealth = self.wealth,
            "period complete"
        );

        let experts = self.agent.experts();
        self.history.push(PeriodRecord {
            period: self.period,
            date,
            prices,
            rewards: experts.rewards(),
            buy: experts.buy_flags(),
            weights: weights_before,
            wealth_before,
            wealth: self.wealth,
            outcome,
            accrued,
        });

        if !self.hooks.is_empty() {
            self.hooks.on_period_end(&PeriodSnapshot {
                period: self.period,
                date,
                weights: self.agent.weights().to_vec(),
                rewards: self.agent.rewards().to_vec(),
                wealth_before,
                wealth: self.wealth,
                outcome,
                accrued,
            });
        }

        self.current_date = Some(date);
        self.period = self.period.next();
        Ok(self.state)
    }

    /// Step until the run stops.
    ///
    /// Running out of data is a normal way to finish, not an error.
    pub fn run(&mut self) -> Result<StopReason> {
        loop {
            if let RunState::Stopped(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }

    fn start(&mut self) {
        self.started = true;
        info!(
            agent = self.agent.name(),
            assets = self.universe().len(),
            initial_wealth = self.wealth,
            start = ?self.config.start_date,
            end = ?self.config.end_date,
            "simulation started"
        );
        self.hooks.on_run_start(&RunStart {
            universe: self.universe().clone(),
            agent: self.agent.name().to_string(),
            initial_wealth: self.wealth,
        });
    }

    fn stop(&mut self, reason: StopReason) -> RunState {
        self.state = RunState::Stopped(reason);
        info!(
            %reason,
            periods = self.history.len(),
            final_wealth = self.wealth,
            "simulation stopped"
        );
        self.hooks.on_run_end(&self.summary());
        self.state
    }

    /// One observation per source, or `None` if any source is exhausted.
    ///
    /// Prices are checked here so no source can hand an expert a zero,
    /// negative or non-finite price.
    fn read_period(&mut self) -> Result<Option<Vec<Observation>>> {
        self.rows_read += 1;
        let row = self.rows_read;
        let mut observations = Vec::with_capacity(self.sources.len());
        for source in &mut self.sources {
            match source.next_observation()? {
                Some(observation) => {
                    validate_price(observation.price).map_err(|e| FeedError::Malformed {
                        asset: source.asset().into(),
                        row,
                        source: ObservationError::Price(e),
                    })?;
                    observations.push(observation);
                }
                None => {
                    debug!(asset = source.asset(), "price source exhausted");
                    return Ok(None);
                }
            }
        }
        Ok(Some(observations))
    }

    /// The period is dated by the last source read.
    fn period_date(&self, observations: &[Observation]) -> NaiveDate {
        let date = observations
            .last()
            .map(|o| o.date)
            .unwrap_or(NaiveDate::MIN);
        for (source, observation) in self.sources.iter().zip(observations) {
            if observation.date != date {
                warn!(
                    asset = source.asset(),
                    asset_date = %observation.date,
                    period_date = %date,
                    "price sources disagree on date"
                );
            }
        }
        date
    }

    /// Apply the agent's rewards to the portfolio and reallocate.
    fn accrue(&mut self) -> bool {
        let rewards = self.agent.rewards();
        if !rewards_ready(rewards) {
            return false;
        }

        for (position, reward) in self.portfolio.iter_mut().zip(rewards) {
            *position *= reward;
        }
        self.wealth = self.portfolio.iter().sum();

        let wealth = self.wealth;
        for (position, weight) in self.portfolio.iter_mut().zip(self.agent.weights()) {
            *position = weight * wealth;
        }
        true
    }
}

fn check_alignment(sources: &[Box<dyn PriceSource>], universe: &AssetUniverse) -> Result<()> {
    if sources.len() != universe.len() {
        return Err(SimulationError::SourceCount {
            expected: universe.len(),
            actual: sources.len(),
        });
    }
    for (index, (source, expected)) in sources.iter().zip(universe.iter()).enumerate() {
        if source.asset() != expected.as_str() {
            return Err(SimulationError::UniverseMismatch {
                index,
                expected: expected.clone(),
                found: source.asset().to_string(),
            });
        }
    }
    Ok(())
}
