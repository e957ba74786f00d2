//! Agent trait definition and update outcome types.
//!
//! Agents are the meta-allocators of the system. Each period the simulation
//! feeds prices to the agent's experts, then calls [`Agent::update`] so the
//! agent can turn the experts' rewards into a new weight vector.

use std::fmt;

use experts::ExpertPanel;
use types::AssetUniverse;

use crate::state::AllocatorState;

/// Why an update did not touch the weights or the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// At least one expert has not produced a positive reward yet.
    RewardsNotReady,
    /// The reweighting produced no usable distribution (zero or non-finite sum).
    DegenerateWeights,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::RewardsNotReady => write!(f, "rewards not ready"),
            SkipReason::DegenerateWeights => write!(f, "degenerate weights"),
        }
    }
}

/// Result of one [`Agent::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Weights were recomputed and appended to the history.
    Updated,
    /// Weights were left as they are but logged to the history.
    Held,
    /// Nothing changed and nothing was logged.
    Skipped(SkipReason),
}

impl UpdateOutcome {
    /// Whether a weight vector was appended to the history.
    pub fn logged(&self) -> bool {
        !matches!(self, UpdateOutcome::Skipped(_))
    }
}

/// Core trait for meta-allocators.
///
/// Implementations own an [`AllocatorState`]; the provided methods read
/// through it so that all agents expose the same view.
pub trait Agent: Send + fmt::Debug {
    /// Recompute weights from the experts' current rewards.
    fn update(&mut self) -> UpdateOutcome;

    /// Shared allocator state.
    fn state(&self) -> &AllocatorState;

    /// Mutable shared state, used by the simulation to feed experts.
    fn state_mut(&mut self) -> &mut AllocatorState;

    /// Short name used in logs and reports.
    fn name(&self) -> &str {
        "Agent"
    }

    fn weights(&self) -> &[f64] {
        self.state().weights()
    }

    fn rewards(&self) -> &[f64] {
        self.state().rewards()
    }

    fn weights_history(&self) -> &[Vec<f64>] {
        self.state().weights_history()
    }

    fn experts(&self) -> &ExpertPanel {
        self.state().experts()
    }

    fn experts_mut(&mut self) -> &mut ExpertPanel {
        self.state_mut().experts_mut()
    }

    fn universe(&self) -> &AssetUniverse {
        self.state().universe()
    }
}
