//! Concrete expert implementations.
//!
//! - [`Dummy`] - passive long-only baseline
//! - [`MeanReversion`] - rolling mean/std band signal

mod dummy;
mod mean_reversion;

pub use dummy::Dummy;
pub use mean_reversion::MeanReversion;
