//! Passive long-only expert.
//!
//! Always recommends buying; its reward is the plain one-period return
//! `price / previous_price`. Serves as the buy-and-hold baseline signal.

use crate::state::ExpertState;
use crate::traits::Expert;
use types::AssetId;

/// Passive expert with no window.
#[derive(Debug, Clone)]
pub struct Dummy {
    state: ExpertState,
}

impl Dummy {
    /// Create a new passive expert for the given asset.
    pub fn new(name: impl Into<AssetId>) -> Self {
        Self {
            state: ExpertState::new(name, true),
        }
    }
}

impl Expert for Dummy {
    fn update(&mut self, price: f64) {
        // First observation: nothing to compare against, reward stays unset.
        if let Some(last) = self.state.last_price() {
            self.state.set_reward(price / last);
        }
        self.state.observe(price);
    }

    fn state(&self) -> &ExpertState {
        &self.state
    }

    fn kind(&self) -> &'static str {
        "Dummy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_leaves_reward_unset() {
        let mut expert = Dummy::new("AAPL");
        expert.update(100.0);
        assert_eq!(expert.reward(), 0.0);
        assert_eq!(expert.last_price(), Some(100.0));
        assert!(expert.buy());
    }

    #[test]
    fn test_second_update_realizes_simple_return() {
        let mut expert = Dummy::new("AAPL");
        expert.update(100.0);
        expert.update(110.0);
        assert!((expert.reward() - 1.1).abs() < 1e-12);
        assert_eq!(expert.last_price(), Some(110.0));

        expert.update(99.0);
        assert!((expert.reward() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_always_recommends_buy() {
        let mut expert = Dummy::new("IBM");
        for price in [50.0, 40.0, 30.0, 60.0] {
            expert.update(price);
            assert!(expert.buy());
        }
        assert!(expert.window().is_none());
    }
}
