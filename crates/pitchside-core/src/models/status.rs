//! Match status model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase of a match. Changed only through [`crate::lifecycle::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created, not kicked off
    #[default]
    Scheduled,
    /// First half in play
    FirstHalf,
    /// Break between halves
    Halftime,
    /// Second half in play
    SecondHalf,
    /// Terminal state
    Finished,
}

impl MatchStatus {
    /// Every status, in match order.
    pub const ALL: [Self; 5] = [
        Self::Scheduled,
        Self::FirstHalf,
        Self::Halftime,
        Self::SecondHalf,
        Self::Finished,
    ];

    /// Storage/wire name (`first_half`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::FirstHalf => "first_half",
            Self::Halftime => "halftime",
            Self::SecondHalf => "second_half",
            Self::Finished => "finished",
        }
    }

    /// Label shown to viewers
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::FirstHalf => "1st Half",
            Self::Halftime => "Half Time",
            Self::SecondHalf => "2nd Half",
            Self::Finished => "Full Time",
        }
    }

    /// Whether play is underway; the public clock is only shown then.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::FirstHalf | Self::SecondHalf)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown match status '{s}'"))
    }
}
