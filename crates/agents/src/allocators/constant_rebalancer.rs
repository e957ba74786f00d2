//! Constant-rebalanced allocator.
//!
//! Keeps its initial weights forever. Rebalancing back to them every period
//! is implied by the simulation applying the same weights to each period's
//! rewards.

use experts::ExpertPanel;
use tracing::debug;

use crate::error::Result;
use crate::state::AllocatorState;
use crate::traits::{Agent, SkipReason, UpdateOutcome};

/// Constant-rebalanced meta-allocator.
#[derive(Debug)]
pub struct ConstantRebalancer {
    state: AllocatorState,
}

impl ConstantRebalancer {
    /// Create with uniform or explicit target weights.
    pub fn new(experts: ExpertPanel, weights: Option<Vec<f64>>) -> Result<Self> {
        Ok(Self {
            state: AllocatorState::new(experts, weights)?,
        })
    }
}

impl Agent for ConstantRebalancer {
    fn update(&mut self) -> UpdateOutcome {
        if !self.state.read_rewards() {
            debug!(agent = "ConstantRebalancer", "rewards not ready, skipping update");
            return UpdateOutcome::Skipped(SkipReason::RewardsNotReady);
        }

        self.state.log_weights();
        UpdateOutcome::Held
    }

    fn state(&self) -> &AllocatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AllocatorState {
        &mut self.state
    }

    fn name(&self) -> &str {
        "ConstantRebalancer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use experts::{Dummy, Expert};

    #[test]
    fn test_weights_never_move() {
        let experts = ["A", "B", "C"]
            .iter()
            .map(|n| Box::new(Dummy::new(*n)) as Box<dyn Expert>)
            .collect();
        let panel = ExpertPanel::new(experts).unwrap();
        let mut agent = ConstantRebalancer::new(panel, Some(vec![0.2, 0.3, 0.5])).unwrap();
        let initial = agent.weights().to_vec();

        let periods = [[10.0, 20.0, 30.0], [11.0, 18.0, 33.0], [9.0, 25.0, 31.0]];
        for (i, prices) in periods.iter().enumerate() {
            agent.experts_mut().update_all(prices).unwrap();
            let outcome = agent.update();
            if i == 0 {
                assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::RewardsNotReady));
            } else {
                assert_eq!(outcome, UpdateOutcome::Held);
            }
            assert_eq!(agent.weights(), initial.as_slice());
        }

        assert_eq!(agent.weights_history().len(), 2);
        assert!(agent.weights_history().iter().all(|w| *w == initial));
    }
}
