//! Error types for agent construction.

use thiserror::Error;

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur while building an agent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// Initial weights must have one entry per expert.
    #[error("expected {expected} initial weights (one per expert), got {actual}")]
    WeightCount { expected: usize, actual: usize },
    /// A weight was negative, NaN or infinite.
    #[error("initial weight {index} must be finite and non-negative, got {value}")]
    InvalidWeight { index: usize, value: f64 },
    /// All initial weights were zero.
    #[error("initial weights must have a positive sum")]
    ZeroWeightSum,
    /// Learning rate must be finite and non-negative.
    #[error("learning rate must be finite and >= 0, got {0}")]
    InvalidLearningRate(f64),
}
