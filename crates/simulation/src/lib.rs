//! Simulation crate: the wealth loop for the online portfolio gym.
//!
//! This crate provides the simulation runner that coordinates:
//! - Reading one dated price per asset per period from [`PriceSource`]s
//! - Feeding prices to the agent's experts
//! - Agent weight updates
//! - Wealth accrual and reallocation
//! - Hook-based observation
//!
//! # Architecture
//!
//! The simulation runs in discrete periods:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Simulation.step()              │
//! │                                             │
//! │  1. Read one observation from every source  │
//! │  2. Stop on exhaustion or past end date     │
//! │  3. Discard periods before start date       │
//! │  4. Feed each expert its price              │
//! │  5. Log the period                          │
//! │  6. agent.update()                          │
//! │  7. Accrue rewards, reallocate              │
//! │  8. Hook: on_period_end                     │
//! │                                             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use simulation::{PriceSource, Simulation, SimulationConfig, StopReason, VecSource};
//! use types::{AgentConfig, ExpertConfig};
//!
//! let start = types::parse_date("2000-01-03").unwrap();
//! let sources: Vec<Box<dyn PriceSource>> = vec![
//!     Box::new(VecSource::daily("A", start, &[100.0, 110.0, 121.0])),
//!     Box::new(VecSource::daily("B", start, &[100.0, 90.0, 81.0])),
//! ];
//!
//! let mut sim = Simulation::from_configs(
//!     sources,
//!     &ExpertConfig::Dummy,
//!     &AgentConfig::ConstantRebalancer { weights: None },
//!     SimulationConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(sim.run().unwrap(), StopReason::DataExhausted);
//! assert!((sim.wealth() - 1.0).abs() < 1e-12);
//! ```

pub mod config;
mod error;
pub mod factory;
pub mod feed;
pub mod history;
pub mod hooks;
pub mod metrics;
mod runner;
mod summary;

pub use config::SimulationConfig;
pub use error::{FeedError, Result, SimulationError};
pub use factory::{build_agent, build_expert, build_expert_panel};
pub use feed::{PriceSource, VecSource};
pub use history::{PeriodRecord, RunHistory};
pub use hooks::{HookRunner, PeriodSnapshot, RunStart, SimulationHook};
pub use metrics::{MetricsHook, MetricsSnapshot};
pub use runner::{RunState, Simulation};
pub use summary::{RunSummary, StopReason};
