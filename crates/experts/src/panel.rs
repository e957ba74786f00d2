//! Ordered collection of experts, one per asset.
//!
//! The panel pairs an [`AssetUniverse`] with one expert per asset, stored in
//! the same order. Reward vectors read from the panel are positional over the
//! universe, which is what lets agents combine them with weight vectors.

use types::{AssetId, AssetUniverse};

use crate::error::{ExpertError, Result};
use crate::traits::Expert;

/// Experts in universe order.
#[derive(Debug)]
pub struct ExpertPanel {
    universe: AssetUniverse,
    experts: Vec<Box<dyn Expert>>,
}

impl ExpertPanel {
    /// Build a panel from experts; their names define the universe order.
    pub fn new(experts: Vec<Box<dyn Expert>>) -> Result<Self> {
        let universe = AssetUniverse::new(experts.iter().map(|e| e.name().to_string()))?;
        Ok(Self { universe, experts })
    }

    /// Build a panel by constructing one expert per asset.
    pub fn from_universe<F>(universe: &AssetUniverse, mut make: F) -> Result<Self>
    where
        F: FnMut(&AssetId) -> Result<Box<dyn Expert>>,
    {
        let experts = universe.iter().map(&mut make).collect::<Result<Vec<_>>>()?;
        Self::new(experts)
    }

    /// Asset ordering shared by rewards and weights.
    pub fn universe(&self) -> &AssetUniverse {
        &self.universe
    }

    /// Number of experts.
    pub fn len(&self) -> usize {
        self.experts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }

    /// Current reward of every expert, in universe order.
    pub fn rewards(&self) -> Vec<f64> {
        self.experts.iter().map(|e| e.reward()).collect()
    }

    /// Current buy flag of every expert, in universe order.
    pub fn buy_flags(&self) -> Vec<bool> {
        self.experts.iter().map(|e| e.buy()).collect()
    }

    /// Last observed price of every expert, in universe order.
    pub fn last_prices(&self) -> Vec<Option<f64>> {
        self.experts.iter().map(|e| e.last_price()).collect()
    }

    /// Expert following `asset`.
    pub fn get(&self, asset: &str) -> Option<&dyn Expert> {
        self.universe
            .index_of(asset)
            .map(|i| self.experts[i].as_ref())
    }

    /// Expert at a universe position.
    pub fn get_at(&self, index: usize) -> Option<&dyn Expert> {
        self.experts.get(index).map(|e| e.as_ref())
    }

    pub fn get_mut_at(&mut self, index: usize) -> Option<&mut (dyn Expert + 'static)> {
        self.experts.get_mut(index).map(|e| e.as_mut())
    }

    /// Feed one price per expert, in universe order.
    ///
    /// The length is checked before any expert is touched.
    pub fn update_all(&mut self, prices: &[f64]) -> Result<()> {
        if prices.len() != self.experts.len() {
            return Err(ExpertError::PriceCount {
                expected: self.experts.len(),
                actual: prices.len(),
            });
        }

        for (expert, &price) in self.experts.iter_mut().zip(prices) {
            expert.update(price);
        }
        Ok(())
    }

    /// Iterate `(asset, expert)` pairs in universe order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &dyn Expert)> + '_ {
        self.universe
            .iter()
            .zip(self.experts.iter().map(|e| e.as_ref()))
    }
}
