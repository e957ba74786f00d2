//! Expert trait definition.
//!
//! An expert follows a single asset. Each period it receives exactly one new
//! price and updates its realized reward and its buy recommendation.
//!
//! # Reward Semantics
//!
//! The reward is a return multiplier: `1.0` is flat, above one a gain,
//! below one a loss. It stays at `0.0` until the expert has enough history
//! to realize a return, which agents treat as "not ready yet".

use std::fmt;

use quant::RollingWindow;

use crate::state::ExpertState;

/// The core trait that all experts must implement.
///
/// # Example
/// ```ignore
/// #[derive(Debug)]
/// struct AlwaysFlat {
///     state: ExpertState,
/// }
///
/// impl Expert for AlwaysFlat {
///     fn update(&mut self, price: f64) {
///         self.state.observe(price);
///         self.state.set_reward(1.0);
///     }
///
///     fn state(&self) -> &ExpertState {
///         &self.state
///     }
/// }
/// ```
pub trait Expert: Send + fmt::Debug {
    /// Consume the next observed price for this expert's asset.
    ///
    /// The simulation rejects non-finite and non-positive prices before they
    /// reach an expert.
    fn update(&mut self, price: f64);

    /// Get a reference to the expert's state.
    fn state(&self) -> &ExpertState;

    /// Asset this expert follows.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// Last realized reward (`0.0` before the first one).
    fn reward(&self) -> f64 {
        self.state().reward()
    }

    /// Current buy recommendation.
    fn buy(&self) -> bool {
        self.state().buy()
    }

    /// Most recently observed price.
    fn last_price(&self) -> Option<f64> {
        self.state().last_price()
    }

    /// Short variant name for logs.
    fn kind(&self) -> &'static str {
        "Expert"
    }

    /// The expert's price window, for variants that keep one.
    fn window(&self) -> Option<&RollingWindow> {
        None
    }
}
