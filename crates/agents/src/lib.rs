//! Agents crate: meta-allocators over a panel of experts.
//!
//! This crate provides:
//! - The `Agent` trait every allocator implements
//! - `AllocatorState` for the shared state (experts, weights, rewards, history)
//! - `UpdateOutcome` describing what an update did
//! - Concrete allocators (`allocators` module)
//!
//! # Architecture
//! An agent owns an [`experts::ExpertPanel`]. After the simulation has fed the
//! period's prices to the panel it calls [`Agent::update`], and the agent
//! reads the reward vector and recomputes its weights. Weight and reward
//! vectors are positional over the panel's asset universe.
//!
//! Updates are gated on [`rewards_ready`]: until every expert has realized a
//! strictly positive reward the agent reports
//! [`UpdateOutcome::Skipped`] and leaves its weights and history alone.
//!
//! # Available Allocators
//! - [`allocators::Eg`] - Exponentiated-gradient multiplicative weights
//! - [`allocators::BuyHold`] - Weights drift with realized rewards
//! - [`allocators::ConstantRebalancer`] - Fixed weights
//!
//! # Example
//! ```
//! use agents::{Agent, Eg, UpdateOutcome};
//! use experts::{Dummy, Expert, ExpertPanel};
//!
//! let panel = ExpertPanel::new(vec![
//!     Box::new(Dummy::new("A")) as Box<dyn Expert>,
//!     Box::new(Dummy::new("B")),
//! ])
//! .unwrap();
//! let mut agent = Eg::new(panel, 0.05).unwrap();
//!
//! agent.experts_mut().update_all(&[100.0, 100.0]).unwrap();
//! assert!(!agent.update().logged());
//!
//! agent.experts_mut().update_all(&[110.0, 90.0]).unwrap();
//! assert_eq!(agent.update(), UpdateOutcome::Updated);
//! assert!(agent.weights()[0] > 0.5);
//! ```

pub mod allocators;
mod error;
mod state;
mod traits;

pub use allocators::{BuyHold, ConstantRebalancer, DEFAULT_ETA, Eg, eg_step};
pub use error::{AgentError, Result};
pub use state::{AllocatorState, normalize, rewards_ready};
pub use traits::{Agent, SkipReason, UpdateOutcome};
