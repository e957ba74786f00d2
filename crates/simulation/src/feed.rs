//! Price sources: one ordered stream of observations per asset.

use std::collections::VecDeque;

use types::{AssetId, NaiveDate, Observation};

use crate::error::FeedError;

/// A forward-only stream of dated prices for one asset.
///
/// `Ok(None)` means the stream is exhausted; it is not an error. Malformed
/// rows are reported as [`FeedError`] and abort the run.
pub trait PriceSource: Send {
    /// Asset this source yields prices for.
    fn asset(&self) -> &str;

    /// Next observation, or `None` when exhausted.
    fn next_observation(&mut self) -> Result<Option<Observation>, FeedError>;
}

impl std::fmt::Debug for dyn PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSource")
            .field("asset", &self.asset())
            .finish()
    }
}

/// In-memory price source.
#[derive(Debug, Clone)]
pub struct VecSource {
    asset: AssetId,
    observations: VecDeque<Observation>,
}

impl VecSource {
    pub fn new(asset: impl Into<AssetId>, observations: Vec<Observation>) -> Self {
        Self {
            asset: asset.into(),
            observations: observations.into(),
        }
    }

    /// One observation per price on consecutive calendar days from `start`.
    pub fn daily(asset: impl Into<AssetId>, start: NaiveDate, prices: &[f64]) -> Self {
        let observations = start
            .iter_days()
            .zip(prices)
            .map(|(date, &price)| Observation::new(date, price))
            .collect();
        Self::new(asset, observations)
    }

    /// Observations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.observations.len()
    }
}

impl PriceSource for VecSource {
    fn asset(&self) -> &str {
        &self.asset
    }

    fn next_observation(&mut self) -> Result<Option<Observation>, FeedError> {
        Ok(self.observations.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_source_yields_in_order() {
        let start = types::parse_date("2000-01-30").unwrap();
        let mut source = VecSource::daily("AAPL", start, &[1.0, 2.0, 3.0]);
        assert_eq!(source.asset(), "AAPL");
        assert_eq!(source.remaining(), 3);

        let first = source.next_observation().unwrap().unwrap();
        assert_eq!(first.date, start);
        assert_eq!(first.price, 1.0);

        source.next_observation().unwrap();
        let third = source.next_observation().unwrap().unwrap();
        assert_eq!(third.date, types::parse_date("2000-02-01").unwrap());
        assert!(source.next_observation().unwrap().is_none());
        assert!(source.next_observation().unwrap().is_none());
    }
}
