//! Core types for the online portfolio gym.
//!
//! This crate provides the data types shared by every other crate:
//! - [`AssetId`] and the ordered [`AssetUniverse`]
//! - [`Observation`] rows and strict price/date parsing
//! - [`ExpertConfig`] / [`AgentConfig`] variant selection

mod config;
mod ids;
mod market_data;

pub use config::{AgentConfig, ExpertConfig};
pub use ids::{AssetId, AssetUniverse, Period, UniverseError};
pub use market_data::{
    DATE_FORMAT, DateError, Observation, ObservationError, PriceError, parse_date, parse_price,
    validate_price,
};

// =============================================================================
// Constants
// =============================================================================

/// Tolerance for "weights sum to one" checks.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Trading periods per year used for annualization.
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Re-exported so downstream crates name dates the same way.
pub use chrono::NaiveDate;
