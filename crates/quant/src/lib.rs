//! Quantitative utilities for the online portfolio gym.
//!
//! # Modules
//!
//! - [`rolling`] - Bounded sliding window with rolling mean / std
//! - [`stats`] - Statistical utilities over slices
//! - [`risk`] - Wealth-curve performance metrics (annualized return, drawdown, Sharpe)
//!
//! # Design Notes
//!
//! - All calculations use `f64`
//! - Standard deviations are population (`n` denominator) unless named `sample_*`

pub mod risk;
pub mod rolling;
pub mod stats;

pub use risk::{
    PerformanceMetrics, annualized_return, annualized_volatility, max_drawdown, sharpe_ratio,
    total_return,
};
pub use rolling::RollingWindow;
