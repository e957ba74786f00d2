//! Buy-and-hold allocator.
//!
//! Weights drift with realized rewards, `w_i <- w_i * r_i / Σ w_j * r_j`,
//! which is what a portfolio that is never rebalanced does on its own.

use experts::ExpertPanel;
use tracing::{debug, warn};

use crate::error::Result;
use crate::state::{AllocatorState, normalize};
use crate::traits::{Agent, SkipReason, UpdateOutcome};

/// Buy-and-hold meta-allocator.
#[derive(Debug)]
pub struct BuyHold {
    state: AllocatorState,
}

impl BuyHold {
    /// Create with uniform or explicit initial weights.
    pub fn new(experts: ExpertPanel, initial_weights: Option<Vec<f64>>) -> Result<Self> {
        Ok(Self {
            state: AllocatorState::new(experts, initial_weights)?,
        })
    }
}

impl Agent for BuyHold {
    fn update(&mut self) -> UpdateOutcome {
        if !self.state.read_rewards() {
            debug!(agent = "BuyHold", "rewards not ready, skipping update");
            return UpdateOutcome::Skipped(SkipReason::RewardsNotReady);
        }

        let drifted: Vec<f64> = self
            .state
            .weights()
            .iter()
            .zip(self.state.rewards())
            .map(|(w, r)| w * r)
            .collect();

        match normalize(&drifted) {
            Some(weights) => {
                self.state.commit_weights(weights);
                UpdateOutcome::Updated
            }
            None => {
                warn!(agent = "BuyHold", "drifted weights degenerated, keeping previous weights");
                UpdateOutcome::Skipped(SkipReason::DegenerateWeights)
            }
        }
    }

    fn state(&self) -> &AllocatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AllocatorState {
        &mut self.state
    }

    fn name(&self) -> &str {
        "BuyHold"
    }
}
