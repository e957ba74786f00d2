//! Error types for price feeds and simulation runs.

use agents::AgentError;
use experts::ExpertError;
use thiserror::Error;
use types::{AssetId, ObservationError};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors raised by a [`PriceSource`](crate::PriceSource).
#[derive(Debug, Error)]
pub enum FeedError {
    /// A row could not be turned into a valid observation.
    #[error("{asset}: row {row}: {source}")]
    Malformed {
        asset: AssetId,
        row: u64,
        #[source]
        source: ObservationError,
    },
    /// The input is missing a required column.
    #[error("{asset}: missing column `{column}`")]
    MissingColumn { asset: AssetId, column: String },
    /// The underlying reader failed.
    #[error("{asset}: {source}")]
    Read {
        asset: AssetId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FeedError {
    /// Asset whose feed failed.
    pub fn asset(&self) -> &str {
        match self {
            FeedError::Malformed { asset, .. }
            | FeedError::MissingColumn { asset, .. }
            | FeedError::Read { asset, .. } => asset,
        }
    }
}

/// Errors that abort a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Malformed or unreadable price data.
    #[error("price feed failed: {0}")]
    Feed(#[from] FeedError),

    /// Sources are not aligned one-to-one with the agent's universe.
    #[error("source {index} is `{found}` but the agent expects `{expected}` at that position")]
    UniverseMismatch {
        index: usize,
        expected: AssetId,
        found: AssetId,
    },

    /// Different number of sources and experts.
    #[error("expected {expected} price sources (one per expert), got {actual}")]
    SourceCount { expected: usize, actual: usize },

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Expert(#[from] ExpertError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}
