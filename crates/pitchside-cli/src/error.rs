use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] pitchside_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Match not found: {0}")]
    MatchNotFound(String),
    #[error("Invalid match ID: {0}")]
    InvalidMatchId(String),
    #[error("Invalid PIN: {0}")]
    InvalidPin(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
