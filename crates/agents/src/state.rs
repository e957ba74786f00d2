//! Common allocator state tracking.
//!
//! Every agent owns the expert panel, the current weight vector, the last
//! reward vector it read and the append-only log of weight vectors. All four
//! are positional over the panel's asset universe.
//!
//! ## Invariants
//!
//! - `weights.len() == rewards.len() == experts.len()` for the whole run
//! - weights are finite, non-negative and sum to 1 (within
//!   [`types::WEIGHT_TOLERANCE`]) after construction and every update
//! - `weights_history` only grows

use experts::ExpertPanel;
use types::AssetUniverse;

use crate::error::{AgentError, Result};

/// Whether a reward vector can drive an update: every entry strictly positive.
///
/// An expert reports `0.0` until it has realized its first return, so a
/// vector containing a zero means the run is still warming up.
pub fn rewards_ready(rewards: &[f64]) -> bool {
    !rewards.is_empty() && rewards.iter().all(|&r| r > 0.0)
}

/// Scale non-negative values so they sum to one.
///
/// Returns `None` when the sum is zero or not finite.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let sum: f64 = values.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }
    Some(values.iter().map(|v| v / sum).collect())
}

/// Common state shared across agent implementations.
#[derive(Debug)]
pub struct AllocatorState {
    experts: ExpertPanel,
    weights: Vec<f64>,
    rewards: Vec<f64>,
    weights_history: Vec<Vec<f64>>,
}

impl AllocatorState {
    /// Create allocator state over a panel.
    ///
    /// Without initial weights every expert gets `1/N`. Supplied weights must
    /// have one finite non-negative entry per expert and a positive sum; they
    /// are normalized to sum to one.
    pub fn new(experts: ExpertPanel, initial_weights: Option<Vec<f64>>) -> Result<Self> {
        let n = experts.len();
        let weights = match initial_weights {
            None => vec![1.0 / n as f64; n],
            Some(weights) => validate_weights(weights, n)?,
        };

        Ok(Self {
            experts,
            weights,
            rewards: vec![0.0; n],
            weights_history: Vec::new(),
        })
    }

    pub fn experts(&self) -> &ExpertPanel {
        &self.experts
    }

    pub fn experts_mut(&mut self) -> &mut ExpertPanel {
        &mut self.experts
    }

    pub fn universe(&self) -> &AssetUniverse {
        self.experts.universe()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    pub fn weights_history(&self) -> &[Vec<f64>] {
        &self.weights_history
    }

    /// Copy the experts' current rewards into `rewards` and report whether
    /// they are ready to drive an update.
    pub fn read_rewards(&mut self) -> bool {
        self.rewards = self.experts.rewards();
        rewards_ready(&self.rewards)
    }

    /// Replace the weight vector and log it.
    ///
    /// # Panics
    /// Panics if the length differs from the expert count; that would break
    /// positional alignment for the rest of the run.
    pub fn commit_weights(&mut self, weights: Vec<f64>) {
        assert_eq!(
            weights.len(),
            self.weights.len(),
            "weight vector length must stay equal to the expert count"
        );
        self.weights = weights;
        self.weights_history.push(self.weights.clone());
    }

    /// Log the current weights without changing them.
    pub fn log_weights(&mut self) {
        self.weights_history.push(self.weights.clone());
    }
}

fn validate_weights(weights: Vec<f64>, expected: usize) -> Result<Vec<f64>> {
    if weights.len() != expected {
        return Err(AgentError::WeightCount {
            expected,
            actual: weights.len(),
        });
    }

    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(AgentError::InvalidWeight { index, value });
    }

    normalize(&weights).ok_or(AgentError::ZeroWeightSum)
}
