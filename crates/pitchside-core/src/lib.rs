//! pitchside-core - Core library for Pitchside
//!
//! This crate contains the match model, the lifecycle state machine, the
//! local clock, the PIN gate, the storage backends and the polling reader
//! shared by every Pitchside front-end.

pub mod access;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod share;
pub mod store;
pub mod sync;
pub mod util;

pub use access::{authorize, Access};
pub use clock::{format_clock, ClockTicker, MatchClock, CLOCK_TICK};
pub use config::StoreKind;
pub use error::{Error, Result};
pub use models::{ClockSnapshot, MatchId, MatchRecord, MatchStatus, Pin, PublicMatch, Side};
pub use services::{create_match, list_public, AdminSession, DatabaseService};
pub use share::{match_id_from_path, public_url_for, resolve_public_path};
pub use store::{JsonFileStore, MatchStore, MemoryMatchStore};
pub use sync::{SyncHandle, SyncReader, SyncUpdate, POLL_INTERVAL};
