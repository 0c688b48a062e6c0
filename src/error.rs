//! Error types for the qoxo crate

use thiserror::Error;

/// Main error type for the qoxo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("action ({row}, {col}) is out of bounds (row and column must be 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("no legal actions available: the board is terminal")]
    NoLegalActions,

    #[error("invalid state key '{key}': {reason}")]
    InvalidStateKey { key: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
