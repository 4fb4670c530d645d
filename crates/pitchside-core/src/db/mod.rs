//! Database layer for Pitchside

mod connection;
mod migrations;
mod repository;

pub use connection::{Database, SyncConfig};
pub use repository::LibSqlMatchRepository;
