//! Services composing the store, gate, engine and clock.

mod admin;
mod database;
mod matches;

pub use admin::AdminSession;
pub use database::DatabaseService;
pub use matches::{create_match, list_public};
