//! Data models for Pitchside

mod match_record;
mod pin;
mod status;

pub use match_record::{ClockSnapshot, MatchId, MatchRecord, PublicMatch, Side};
pub use pin::Pin;
pub use status::MatchStatus;
