//! Rolling mean-reversion expert.
//!
//! Recommends buying when the latest price sits at least `threshold`
//! standard deviations below the rolling mean of the last `n_obs` prices.
//!
//! # Reward Lag
//!
//! The reward realized on each update compares the new price with the
//! *oldest* price in the window, not the immediately preceding one. Once the
//! window is full this is a return over `n_obs` periods, attributed to the
//! recommendation that is current at update time. This lag is kept exactly
//! as-is; whether it should become a one-period return is an open review
//! item.
//!
//! # Strategy Logic
//! - `buy == true`: reward is `price / oldest` (long was right if price rose)
//! - `buy == false`: reward is `oldest / price` (staying out was right if it fell)
//! - After the window update: `buy = price <= mean - threshold * std`

use quant::RollingWindow;
use tracing::trace;
use types::AssetId;

use crate::error::{ExpertError, Result};
use crate::state::ExpertState;
use crate::traits::Expert;

/// Rolling mean-reversion expert.
#[derive(Debug, Clone)]
pub struct MeanReversion {
    state: ExpertState,
    window: RollingWindow,
    /// Standard-deviation multiplier for the buy trigger.
    threshold: f64,
    /// Rolling mean after the last update.
    avg: f64,
    /// Rolling population standard deviation after the last update.
    std: f64,
}

impl MeanReversion {
    /// Create a mean-reversion expert.
    ///
    /// `n_obs` must be positive and `threshold` finite and non-negative.
    pub fn new(name: impl Into<AssetId>, n_obs: usize, threshold: f64) -> Result<Self> {
        if n_obs == 0 {
            return Err(ExpertError::InvalidWindow(n_obs));
        }
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ExpertError::InvalidThreshold(threshold));
        }

        Ok(Self {
            state: ExpertState::new(name, false),
            window: RollingWindow::new(n_obs),
            threshold,
            avg: 0.0,
            std: 0.0,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rolling mean after the last update.
    pub fn avg(&self) -> f64 {
        self.avg
    }

    /// Rolling standard deviation after the last update.
    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Expert for MeanReversion {
    fn update(&mut self, price: f64) {
        // Seed the window; no reward until there is something to compare to.
        let Some(oldest) = self.window.oldest() else {
            self.window.push_evict_oldest(price);
            self.state.observe(price);
            return;
        };

        let reward = if self.state.buy() {
            price / oldest
        } else {
            oldest / price
        };
        self.state.set_reward(reward);

        self.window.push_evict_oldest(price);
        self.avg = self.window.mean().unwrap_or(price);
        self.std = self.window.std_dev().unwrap_or(0.0);

        let buy = price <= self.avg - self.threshold * self.std;
        if buy != self.state.buy() {
            trace!(
                expert = %self.state.name(),
                buy,
                price,
                avg = self.avg,
                std = self.std,
                "recommendation changed"
            );
        }
        self.state.set_buy(buy);
        self.state.observe(price);
    }

    fn state(&self) -> &ExpertState {
        &self.state
    }

    fn kind(&self) -> &'static str {
        "MeanReversion"
    }

    fn window(&self) -> Option<&RollingWindow> {
        Some(&self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(expert: &mut MeanReversion, prices: &[f64]) {
        for &p in prices {
            expert.update(p);
        }
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            MeanReversion::new("AAPL", 0, 1.0).unwrap_err(),
            ExpertError::InvalidWindow(0)
        );
        assert!(matches!(
            MeanReversion::new("AAPL", 3, f64::NAN),
            Err(ExpertError::InvalidThreshold(_))
        ));
        assert_eq!(
            MeanReversion::new("AAPL", 3, -1.0).unwrap_err(),
            ExpertError::InvalidThreshold(-1.0)
        );
        assert!(MeanReversion::new("AAPL", 3, 0.0).is_ok());
    }

    #[test]
    fn test_first_observation_only_seeds_window() {
        let mut expert = MeanReversion::new("AAPL", 3, 1.0).unwrap();
        expert.update(10.0);
        assert_eq!(expert.reward(), 0.0);
        assert!(!expert.buy());
        assert_eq!(expert.window().unwrap().contents(), vec![10.0]);
    }

    #[test]
    fn test_drop_below_band_triggers_buy() {
        let mut expert = MeanReversion::new("AAPL", 3, 1.0).unwrap();
        feed(&mut expert, &[10.0, 10.0, 10.0]);
        // Flat window: mean 10, std 0, and 10 <= 10 holds.
        assert_eq!(expert.avg(), 10.0);
        assert_eq!(expert.std(), 0.0);

        expert.update(8.0);
        assert!(expert.buy());
        assert_eq!(expert.window().unwrap().contents(), vec![10.0, 10.0, 8.0]);
        // Previous recommendation was buy, so the reward is the long return
        // against the oldest windowed price.
        assert!((expert.reward() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_reward_lags_by_window_length() {
        // threshold 0: buy iff price <= rolling mean
        let mut expert = MeanReversion::new("AAPL", 3, 0.0).unwrap();
        feed(&mut expert, &[10.0, 11.0, 12.0]);
        assert!(!expert.buy());

        expert.update(13.0);
        // Compared with 10 (oldest), not 12 (previous); not buying -> inverted.
        assert!((expert.reward() - 10.0 / 13.0).abs() < 1e-12);

        expert.update(14.0);
        assert!((expert.reward() - 11.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_reward_direction_follows_current_recommendation() {
        let mut expert = MeanReversion::new("AAPL", 3, 0.0).unwrap();
        expert.update(10.0);
        expert.update(9.0);
        // Not buying yet: reward is the inverted return.
        assert!((expert.reward() - 10.0 / 9.0).abs() < 1e-12);
        // 9 <= mean(10, 9) -> now a buy.
        assert!(expert.buy());

        expert.update(8.0);
        assert!((expert.reward() - 8.0 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_slot_window_is_degenerate() {
        let mut expert = MeanReversion::new("AAPL", 1, 2.0).unwrap();
        feed(&mut expert, &[10.0, 12.0, 9.0]);
        // One value: avg == price and std == 0, so price <= avg always holds.
        assert!(expert.buy());
        assert_eq!(expert.std(), 0.0);
        assert_eq!(expert.avg(), 9.0);
        assert_eq!(expert.last_price(), Some(9.0));
    }
}
