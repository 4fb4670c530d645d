//! Error types for pitchside-core

use thiserror::Error;

use crate::models::MatchStatus;

/// Result type alias using pitchside-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pitchside-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend refused or could not complete a write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Match not found
    #[error("Match not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Status change outside the allowed transition table
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    /// Supplied PIN does not match the record
    #[error("Incorrect PIN")]
    Unauthorized,

    /// Clock cannot be started once the match is over
    #[error("Match is finished; the clock cannot be started")]
    MatchFinished,
}

impl Error {
    /// Whether this error came from the storage layer rather than from a
    /// rejected operation. Such failures are recoverable by retrying.
    pub const fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::LibSql(_)
                | Self::Io(_)
                | Self::Serialization(_)
                | Self::Persistence(_)
        )
    }
}
