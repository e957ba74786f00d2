//! Run configuration for the `online-portfolio` binary.
//!
//! A run is fully described by a [`RunConfig`]: where the price files live,
//! which expert and agent to build, the simulation window and where reports
//! go. Configs come from a preset, a TOML file, or the defaults, and CLI/env
//! flags are layered on top.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simulation::SimulationConfig;
use types::{AgentConfig, ExpertConfig, NaiveDate};

/// First date of the reference runs.
pub const DEFAULT_START: Option<NaiveDate> = NaiveDate::from_ymd_opt(2000, 1, 1);
/// Last date of the reference runs.
pub const DEFAULT_END: Option<NaiveDate> = NaiveDate::from_ymd_opt(2017, 8, 31);

/// Master configuration for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory holding one `<asset>.csv` per asset.
    pub data_dir: PathBuf,
    /// Column holding the price to trade on.
    pub price_column: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Strategy
    // ─────────────────────────────────────────────────────────────────────────
    pub expert: ExpertConfig,
    pub agent: AgentConfig,

    // ─────────────────────────────────────────────────────────────────────────
    // Simulation
    // ─────────────────────────────────────────────────────────────────────────
    pub simulation: SimulationConfig,

    // ─────────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────────
    /// Root under which each run gets a timestamped report directory.
    pub output_dir: PathBuf,
    /// Write report files after the run.
    pub write_report: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            price_column: "adj_close".to_string(),
            expert: ExpertConfig::Dummy,
            agent: AgentConfig::Eg { eta: 0.05 },
            simulation: SimulationConfig {
                start_date: DEFAULT_START,
                end_date: DEFAULT_END,
                ..SimulationConfig::default()
            },
            output_dir: PathBuf::from("results"),
            write_report: true,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid run config")
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn price_column(mut self, column: impl Into<String>) -> Self {
        self.price_column = column.into();
        self
    }

    pub fn expert(mut self, expert: ExpertConfig) -> Self {
        self.expert = expert;
        self
    }

    pub fn agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn start(mut self, date: NaiveDate) -> Self {
        self.simulation.start_date = Some(date);
        self
    }

    pub fn end(mut self, date: NaiveDate) -> Self {
        self.simulation.end_date = Some(date);
        self
    }

    pub fn wealth(mut self, wealth: f64) -> Self {
        self.simulation.initial_wealth = wealth;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn write_report(mut self, enabled: bool) -> Self {
        self.write_report = enabled;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preset Configurations
// ─────────────────────────────────────────────────────────────────────────────

/// Named reference runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// EG (eta 0.05) over always-long experts.
    EgDummy,
    /// EG (eta 0.05) over mean-reversion experts (10 periods, 1.5 std).
    EgMeanReversion,
    /// Equal-weight constant rebalancing over always-long experts.
    ConstantRebalancer,
    /// Equal-weight buy and hold over always-long experts.
    BuyHold,
}

impl RunConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::EgDummy => Self::eg_dummy(),
            Preset::EgMeanReversion => Self::eg_mean_reversion(),
            Preset::ConstantRebalancer => Self::constant_rebalancer(),
            Preset::BuyHold => Self::buy_hold(),
        }
    }

    pub fn eg_dummy() -> Self {
        Self::default()
            .expert(ExpertConfig::Dummy)
            .agent(AgentConfig::Eg { eta: 0.05 })
    }

    pub fn eg_mean_reversion() -> Self {
        Self::default()
            .expert(ExpertConfig::MeanReversion {
                n_obs: 10,
                threshold: 1.5,
            })
            .agent(AgentConfig::Eg { eta: 0.05 })
    }

    pub fn constant_rebalancer() -> Self {
        Self::default()
            .expert(ExpertConfig::Dummy)
            .agent(AgentConfig::ConstantRebalancer { weights: None })
    }

    pub fn buy_hold() -> Self {
        Self::default()
            .expert(ExpertConfig::Dummy)
            .agent(AgentConfig::BuyHold { weights: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        types::parse_date(raw).unwrap()
    }

    #[test]
    fn test_default_matches_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.simulation.start_date, Some(date("2000-01-01")));
        assert_eq!(config.simulation.end_date, Some(date("2017-08-31")));
        assert_eq!(config.simulation.initial_wealth, 1.0);
        assert_eq!(config.price_column, "adj_close");
        assert_eq!(config, RunConfig::eg_dummy());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            RunConfig::preset(Preset::EgMeanReversion).expert,
            ExpertConfig::MeanReversion {
                n_obs: 10,
                threshold: 1.5
            }
        );
        assert_eq!(
            RunConfig::preset(Preset::ConstantRebalancer).agent,
            AgentConfig::ConstantRebalancer { weights: None }
        );
        assert_eq!(RunConfig::preset(Preset::BuyHold).agent.name(), "BuyHold");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = RunConfig::from_toml_str(
            r#"
            data_dir = "prices"
            write_report = false

            [agent]
            kind = "eg"
            eta = 0.1

            [expert]
            kind = "mean_reversion"
            n_obs = 20
            threshold = 2.0

            [simulation]
            start_date = "2005-01-01"
            initial_wealth = 100.0
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("prices"));
        assert!(!config.write_report);
        assert_eq!(config.agent, AgentConfig::Eg { eta: 0.1 });
        assert_eq!(config.simulation.start_date, Some(date("2005-01-01")));
        // A partial [simulation] table falls back to the library defaults.
        assert_eq!(config.simulation.end_date, None);
        assert_eq!(config.simulation.initial_wealth, 100.0);
        assert_eq!(config.price_column, "adj_close");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(RunConfig::from_toml_str("tick_delay = 5").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "[agent]\nkind = \"buy_hold\"\n").unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.agent, AgentConfig::BuyHold { weights: None });
        assert!(RunConfig::load(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_builders() {
        let config = RunConfig::new()
            .data_dir("d")
            .price_column("close")
            .start(date("2001-01-01"))
            .end(date("2002-01-01"))
            .wealth(5.0)
            .output_dir("out")
            .write_report(false);
        assert_eq!(config.price_column, "close");
        assert_eq!(config.simulation.end_date, Some(date("2002-01-01")));
        assert_eq!(config.simulation.initial_wealth, 5.0);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
