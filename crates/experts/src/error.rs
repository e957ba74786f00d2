//! Error types for expert construction.

use thiserror::Error;
use types::UniverseError;

/// Result type for expert operations.
pub type Result<T> = std::result::Result<T, ExpertError>;

/// Errors that can occur while building experts or panels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpertError {
    /// Window size must be at least one.
    #[error("window size must be > 0, got {0}")]
    InvalidWindow(usize),
    /// Threshold must be finite and non-negative.
    #[error("threshold must be finite and >= 0, got {0}")]
    InvalidThreshold(f64),
    /// Expert names do not form a valid universe.
    #[error("invalid expert panel: {0}")]
    Universe(#[from] UniverseError),
    /// A price vector did not have one entry per expert.
    #[error("expected {expected} prices (one per expert), got {actual}")]
    PriceCount { expected: usize, actual: usize },
}
