//! Match record storage.
//!
//! Every backend stores whole records keyed by id and lists them in
//! insertion order. There are no partial updates, no multi-record
//! transactions and no deletion. Concurrent writers are not coordinated:
//! the last `upsert` for an id wins.
//!
//! Data that cannot be parsed back into a [`MatchRecord`] is reported as
//! absent (and skipped by `list`) rather than as an error, so a damaged
//! entry never takes a reader down.

mod json_file;
mod memory;

use std::future::Future;

use crate::error::Result;
use crate::models::{MatchId, MatchRecord};

pub use json_file::JsonFileStore;
pub use memory::MemoryMatchStore;

/// Durable key-value persistence of match records.
///
/// Futures are `Send` so readers can poll from spawned tasks.
pub trait MatchStore: Send + Sync {
    /// Fetch one record; `None` if absent or unreadable
    fn get(&self, id: &MatchId) -> impl Future<Output = Result<Option<MatchRecord>>> + Send;

    /// All readable records in insertion order
    fn list(&self) -> impl Future<Output = Result<Vec<MatchRecord>>> + Send;

    /// Replace the record with the same id, or append it
    fn upsert(&self, record: &MatchRecord) -> impl Future<Output = Result<()>> + Send;

    /// Pull changes made by other processes, for backends that replicate.
    fn refresh(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}
