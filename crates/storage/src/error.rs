//! Storage error types.

use std::path::PathBuf;

use simulation::FeedError;
use thiserror::Error;
use types::UniverseError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no .csv price files in {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("cannot derive an asset id from {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("invalid asset set: {0}")]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StorageError::Csv {
            path: path.into(),
            source,
        }
    }
}
