//! Experts crate: per-asset signal generators.
//!
//! This crate provides:
//! - The `Expert` trait every signal generator implements
//! - `ExpertState` for the shared readable state (reward, buy, last price)
//! - `ExpertPanel`, the ordered one-expert-per-asset collection agents read from
//! - Concrete experts (`strategies` module)
//!
//! # Architecture
//! Each period an expert receives exactly one new price for its asset and
//! updates its realized reward and buy recommendation. Agents never see
//! prices; they only read the reward vector off the panel.
//!
//! # Available Experts
//! - [`strategies::Dummy`] - Always long; reward is the one-period return
//! - [`strategies::MeanReversion`] - Buys when price drops below a rolling band
//!
//! # Example
//! ```
//! use experts::{Dummy, Expert};
//!
//! let mut expert = Dummy::new("AAPL");
//! expert.update(100.0);
//! expert.update(110.0);
//! assert!((expert.reward() - 1.1).abs() < 1e-12);
//! ```

mod error;
mod panel;
mod state;
pub mod strategies;
mod traits;

pub use error::{ExpertError, Result};
pub use panel::ExpertPanel;
pub use state::{ExpertState, UNSET_REWARD};
pub use strategies::{Dummy, MeanReversion};
pub use traits::Expert;
