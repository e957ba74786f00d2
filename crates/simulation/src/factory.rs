//! Build experts and agents from their declarative configs.

use agents::{Agent, BuyHold, ConstantRebalancer, Eg};
use experts::{Dummy, Expert, ExpertPanel, MeanReversion};
use tracing::debug;
use types::{AgentConfig, AssetId, AssetUniverse, ExpertConfig};

use crate::error::Result;

/// Create one expert for `asset`.
pub fn build_expert(asset: &AssetId, config: &ExpertConfig) -> experts::Result<Box<dyn Expert>> {
    let expert: Box<dyn Expert> = match config {
        ExpertConfig::Dummy => Box::new(Dummy::new(asset.clone())),
        ExpertConfig::MeanReversion { n_obs, threshold } => {
            Box::new(MeanReversion::new(asset.clone(), *n_obs, *threshold)?)
        }
    };
    Ok(expert)
}

/// Create one expert per asset, in universe order.
pub fn build_expert_panel(universe: &AssetUniverse, config: &ExpertConfig) -> Result<ExpertPanel> {
    debug!(expert = config.name(), assets = universe.len(), "building expert panel");
    Ok(ExpertPanel::from_universe(universe, |asset| {
        build_expert(asset, config)
    })?)
}

/// Create the agent described by `config` over `panel`.
pub fn build_agent(panel: ExpertPanel, config: &AgentConfig) -> Result<Box<dyn Agent>> {
    debug!(agent = config.name(), "building agent");
    let agent: Box<dyn Agent> = match config {
        AgentConfig::Eg { eta } => Box::new(Eg::new(panel, *eta)?),
        AgentConfig::BuyHold { weights } => Box::new(BuyHold::new(panel, weights.clone())?),
        AgentConfig::ConstantRebalancer { weights } => {
            Box::new(ConstantRebalancer::new(panel, weights.clone())?)
        }
    };
    Ok(agent)
}
