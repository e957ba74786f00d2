//! Declarative selection of expert and agent variants.
//!
//! Both enums are closed: the set of variants is fixed and the factories in
//! the `simulation` crate match on them exhaustively.

use serde::{Deserialize, Serialize};

// =============================================================================
// Expert Configuration
// =============================================================================

/// Which per-asset expert to run, with its parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpertConfig {
    /// Passive long-only baseline: reward is the plain one-period return.
    #[default]
    Dummy,
    /// Rolling mean-reversion signal.
    MeanReversion {
        /// Window size in periods.
        n_obs: usize,
        /// Standard-deviation multiplier below the mean that triggers a buy.
        threshold: f64,
    },
}

impl ExpertConfig {
    /// Short variant name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            ExpertConfig::Dummy => "Dummy",
            ExpertConfig::MeanReversion { .. } => "MeanReversion",
        }
    }
}

// =============================================================================
// Agent Configuration
// =============================================================================

/// Which meta-allocator to run, with its parameters.
///
/// `weights`, when given, must have one entry per asset in universe order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentConfig {
    /// Exponentiated-gradient multiplicative weights.
    Eg {
        /// Learning rate.
        eta: f64,
    },
    /// Let realized returns drift the weights.
    BuyHold {
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
    /// Rebalance back to fixed target weights every period.
    ConstantRebalancer {
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
}

impl AgentConfig {
    /// Short variant name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            AgentConfig::Eg { .. } => "EG",
            AgentConfig::BuyHold { .. } => "BuyHold",
            AgentConfig::ConstantRebalancer { .. } => "ConstantRebalancer",
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig::Eg { eta: 0.05 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        agent: AgentConfig,
        expert: ExpertConfig,
    }

    #[test]
    fn test_deserialize_tagged_configs() {
        let raw = r#"
            [agent]
            kind = "eg"
            eta = 0.05

            [expert]
            kind = "mean_reversion"
            n_obs = 10
            threshold = 1.5
        "#;
        let parsed: Wrapper = toml::from_str(raw).unwrap();
        assert_eq!(parsed.agent, AgentConfig::Eg { eta: 0.05 });
        assert_eq!(
            parsed.expert,
            ExpertConfig::MeanReversion {
                n_obs: 10,
                threshold: 1.5
            }
        );
    }

    #[test]
    fn test_optional_weights_default_to_none() {
        let raw = r#"
            [agent]
            kind = "constant_rebalancer"

            [expert]
            kind = "dummy"
        "#;
        let parsed: Wrapper = toml::from_str(raw).unwrap();
        assert_eq!(
            parsed.agent,
            AgentConfig::ConstantRebalancer { weights: None }
        );
        assert_eq!(parsed.expert.name(), "Dummy");
    }
}
