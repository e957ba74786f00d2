//! Exponentiated-gradient allocator.
//!
//! Multiplicative-weights update over expert rewards:
//!
//! ```text
//! S   = Σ w_i * r_i
//! w_i <- w_i * exp(eta * r_i / S) / Z
//! ```
//!
//! where `Z` renormalizes the weights to sum to one. Exponents are shifted by
//! their maximum before `exp`, which leaves the normalized result unchanged
//! but keeps large `eta` from overflowing.

use experts::ExpertPanel;
use tracing::{debug, warn};

use crate::error::{AgentError, Result};
use crate::state::{AllocatorState, normalize};
use crate::traits::{Agent, SkipReason, UpdateOutcome};

/// Default learning rate.
pub const DEFAULT_ETA: f64 = 0.05;

/// Exponentiated-gradient meta-allocator.
#[derive(Debug)]
pub struct Eg {
    state: AllocatorState,
    eta: f64,
}

impl Eg {
    /// Create an EG agent with uniform initial weights.
    pub fn new(experts: ExpertPanel, eta: f64) -> Result<Self> {
        Self::with_weights(experts, eta, None)
    }

    /// Create an EG agent with explicit initial weights.
    pub fn with_weights(
        experts: ExpertPanel,
        eta: f64,
        initial_weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        if !(eta.is_finite() && eta >= 0.0) {
            return Err(AgentError::InvalidLearningRate(eta));
        }

        Ok(Self {
            state: AllocatorState::new(experts, initial_weights)?,
            eta,
        })
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }
}

/// One EG step. `None` when the result cannot be normalized.
pub fn eg_step(weights: &[f64], rewards: &[f64], eta: f64) -> Option<Vec<f64>> {
    let portfolio_reward: f64 = weights.iter().zip(rewards).map(|(w, r)| w * r).sum();
    if !(portfolio_reward.is_finite() && portfolio_reward > 0.0) {
        return None;
    }

    let exponents: Vec<f64> = rewards
        .iter()
        .map(|r| eta * r / portfolio_reward)
        .collect();
    let max = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let scaled: Vec<f64> = weights
        .iter()
        .zip(&exponents)
        .map(|(w, x)| w * (x - max).exp())
        .collect();
    normalize(&scaled)
}

impl Agent for Eg {
    fn update(&mut self) -> UpdateOutcome {
        if !self.state.read_rewards() {
            debug!(agent = "EG", "rewards not ready, skipping update");
            return UpdateOutcome::Skipped(SkipReason::RewardsNotReady);
        }

        match eg_step(self.state.weights(), self.state.rewards(), self.eta) {
            Some(weights) => {
                self.state.commit_weights(weights);
                UpdateOutcome::Updated
            }
            None => {
                warn!(agent = "EG", "reweighting degenerated, keeping previous weights");
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
        "EG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use experts::{Dummy, Expert};

    fn dummy_panel(n: usize) -> ExpertPanel {
        let experts = (0..n)
            .map(|i| Box::new(Dummy::new(format!("A{i}"))) as Box<dyn Expert>)
            .collect();
        ExpertPanel::new(experts).unwrap()
    }

    fn feed(agent: &mut Eg, prices: &[f64]) -> UpdateOutcome {
        agent.experts_mut().update_all(prices).unwrap();
        agent.update()
    }

    #[test]
    fn test_rejects_invalid_eta() {
        assert_eq!(
            Eg::new(dummy_panel(2), -0.1).unwrap_err(),
            AgentError::InvalidLearningRate(-0.1)
        );
        assert!(Eg::new(dummy_panel(2), f64::NAN).is_err());
        assert!(Eg::new(dummy_panel(2), 0.0).is_ok());
    }

    #[test]
    fn test_two_asset_step_matches_closed_form() {
        // w = [0.5, 0.5], r = [1.1, 0.9], eta = 1: S = 1.0 and
        // w_0 = e^1.1 / (e^1.1 + e^0.9) = 1 / (1 + e^-0.2) ≈ 0.549834.
        let weights = eg_step(&[0.5, 0.5], &[1.1, 0.9], 1.0).unwrap();
        let expected = 1.0 / (1.0 + (-0.2f64).exp());
        assert!((weights[0] - expected).abs() < 1e-12);
        assert!((weights[1] - (1.0 - expected)).abs() < 1e-12);
        assert!((weights[0] - 0.5499).abs() < 1e-3);
    }

    #[test]
    fn test_zero_eta_keeps_weights() {
        let weights = eg_step(&[0.2, 0.8], &[1.5, 0.5], 0.0).unwrap();
        assert!((weights[0] - 0.2).abs() < 1e-12);
        assert!((weights[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_large_eta_does_not_overflow() {
        let weights = eg_step(&[0.5, 0.5], &[1.2, 0.8], 5_000.0).unwrap();
        assert!(weights.iter().all(|w| w.is_finite()));
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(weights[0] > 0.999);
    }

    #[test]
    fn test_zero_reward_skips_update() {
        let mut agent = Eg::new(dummy_panel(2), 1.0).unwrap();

        // First period: Dummy experts have no reward yet.
        let outcome = feed(&mut agent, &[100.0, 100.0]);
        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::RewardsNotReady));
        assert_eq!(agent.weights(), &[0.5, 0.5]);
        assert!(agent.weights_history().is_empty());
        assert_eq!(agent.rewards(), &[0.0, 0.0]);

        let outcome = feed(&mut agent, &[110.0, 90.0]);
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(agent.weights_history().len(), 1);
        assert!(agent.weights()[0] > agent.weights()[1]);
        assert_eq!(agent.weights_history()[0], agent.weights());
    }

    #[test]
    fn test_single_zero_reward_skips_update() {
        let mut agent = Eg::new(dummy_panel(2), 1.0).unwrap();
        let experts = agent.experts_mut();
        experts.get_mut_at(0).unwrap().update(100.0);
        experts.get_mut_at(0).unwrap().update(110.0);
        experts.get_mut_at(1).unwrap().update(100.0);

        let outcome = agent.update();
        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::RewardsNotReady));
        assert!((agent.rewards()[0] - 1.1).abs() < 1e-12);
        assert_eq!(agent.rewards()[1], 0.0);
        assert_eq!(agent.weights(), &[0.5, 0.5]);
        assert!(agent.weights_history().is_empty());
    }

    #[test]
    fn test_better_expert_gains_weight_over_time() {
        let mut agent = Eg::new(dummy_panel(2), 0.5).unwrap();
        let mut up = 100.0;
        feed(&mut agent, &[up, 100.0]);
        let mut previous = agent.weights()[0];
        for _ in 0..20 {
            up *= 1.01;
            feed(&mut agent, &[up, 100.0]);
            assert!(agent.weights()[0] > previous);
            previous = agent.weights()[0];
        }
    }
}
