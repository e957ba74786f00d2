//! Identifier types for assets and simulation periods.
//!
//! The [`AssetUniverse`] is the single source of asset ordering for a run.
//! Experts, weights and rewards are all positional over it, so it is kept
//! as an explicit ordered list rather than derived from map iteration.

use derive_more::{Add, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Asset Identifier
// =============================================================================

/// Asset ticker (e.g., "AAPL", "MSFT").
pub type AssetId = String;

// =============================================================================
// Period Counter
// =============================================================================

/// Number of periods processed by a simulation (discrete time step).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    From,
    Into,
)]
pub struct Period(pub u64);

impl Period {
    pub const ZERO: Period = Period(0);

    /// The following period.
    #[inline]
    pub fn next(self) -> Self {
        Period(self.0 + 1)
    }

    /// Raw counter value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period#{}", self.0)
    }
}

// =============================================================================
// Asset Universe
// =============================================================================

/// Errors raised while building an [`AssetUniverse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniverseError {
    /// No assets were supplied.
    #[error("asset universe cannot be empty")]
    Empty,
    /// The same asset id appeared twice.
    #[error("duplicate asset in universe: {0}")]
    Duplicate(AssetId),
}

/// Ordered, duplicate-free list of the assets in a run.
///
/// Position `i` in the universe is position `i` in every weight, reward and
/// portfolio vector. The order is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUniverse {
    assets: Vec<AssetId>,
}

impl AssetUniverse {
    /// Build a universe, preserving the given order.
    pub fn new<I, S>(assets: I) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<AssetId>,
    {
        let mut ordered: Vec<AssetId> = Vec::new();
        for asset in assets {
            let asset = asset.into();
            if ordered.contains(&asset) {
                return Err(UniverseError::Duplicate(asset));
            }
            ordered.push(asset);
        }

        if ordered.is_empty() {
            return Err(UniverseError::Empty);
        }

        Ok(Self { assets: ordered })
    }

    /// Number of assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false for a constructed universe; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Position of an asset, if present.
    pub fn index_of(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }

    /// Asset at a position.
    pub fn get(&self, index: usize) -> Option<&AssetId> {
        self.assets.get(index)
    }

    /// Iterate assets in run order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &AssetId> + '_ {
        self.assets.iter()
    }

    /// Assets as a slice, in run order.
    pub fn as_slice(&self) -> &[AssetId] {
        &self.assets
    }
}

impl fmt::Display for AssetUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.assets.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_preserves_order() {
        let universe = AssetUniverse::new(["MSFT", "AAPL", "IBM"]).unwrap();
        let assets: Vec<&str> = universe.iter().map(String::as_str).collect();
        assert_eq!(assets, vec!["MSFT", "AAPL", "IBM"]);
        assert_eq!(universe.index_of("AAPL"), Some(1));
        assert_eq!(universe.index_of("GE"), None);
    }

    #[test]
    fn test_universe_rejects_duplicates() {
        let err = AssetUniverse::new(["AAPL", "IBM", "AAPL"]).unwrap_err();
        assert_eq!(err, UniverseError::Duplicate("AAPL".to_string()));
    }

    #[test]
    fn test_universe_rejects_empty() {
        let err = AssetUniverse::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, UniverseError::Empty);
    }

    #[test]
    fn test_period_next() {
        assert_eq!(Period::ZERO.next(), Period(1));
        assert_eq!(Period(4) + Period(1), Period(5));
        assert_eq!(Period(7).to_string(), "Period#7");
    }
}
