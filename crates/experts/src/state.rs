//! Common expert state tracking.
//!
//! Every expert exposes the same three readable values after an update:
//! the realized reward, the buy recommendation and the last observed price.
//! Implementations embed this struct rather than duplicating the fields.

use types::AssetId;

/// Sentinel reward before an expert has realized its first return.
pub const UNSET_REWARD: f64 = 0.0;

/// Common state shared across expert implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpertState {
    /// Asset this expert follows.
    name: AssetId,
    /// Last realized return multiplier (1.0 = flat). `0.0` until the first
    /// real return is available.
    reward: f64,
    /// Current recommendation: buy (true) or hold/short (false).
    buy: bool,
    /// Most recently observed price.
    last_price: Option<f64>,
    /// Number of prices observed.
    observations: u64,
}

impl ExpertState {
    /// Create a fresh state with the given initial recommendation.
    pub fn new(name: impl Into<AssetId>, buy: bool) -> Self {
        Self {
            name: name.into(),
            reward: UNSET_REWARD,
            buy,
            last_price: None,
            observations: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn buy(&self) -> bool {
        self.buy
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    /// Number of prices observed so far.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    pub fn set_reward(&mut self, reward: f64) {
        self.reward = reward;
    }

    pub fn set_buy(&mut self, buy: bool) {
        self.buy = buy;
    }

    /// Record an observed price.
    pub fn observe(&mut self, price: f64) {
        self.last_price = Some(price);
        self.observations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_no_reward() {
        let state = ExpertState::new("AAPL", false);
        assert_eq!(state.name(), "AAPL");
        assert_eq!(state.reward(), 0.0);
        assert_eq!(state.last_price(), None);
        assert_eq!(state.observations(), 0);
    }

    #[test]
    fn test_observe_tracks_price_and_count() {
        let mut state = ExpertState::new("AAPL", true);
        state.observe(10.0);
        state.observe(11.0);
        assert_eq!(state.last_price(), Some(11.0));
        assert_eq!(state.observations(), 2);
    }
}
