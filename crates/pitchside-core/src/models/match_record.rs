//! Match record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{MatchStatus, Pin};
use crate::error::{Error, Result};

/// Identifier of a match, usable both as a storage key and as a URL path
/// segment.
///
/// New ids are UUID v7 (time-sortable) in hyphen-free form. Any non-empty
/// string of URL-unreserved characters is accepted when parsing, so ids
/// minted by other deployments keep resolving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
    /// Create a new unique match ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> std::result::Result<(), String> {
        if value.is_empty() {
            return Err("match id cannot be empty".to_string());
        }
        if let Some(bad) = value.chars().find(|ch| !is_url_unreserved(*ch)) {
            return Err(format!("match id contains invalid character '{bad}'"));
        }
        Ok(())
    }
}

const fn is_url_unreserved(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~')
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MatchId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for MatchId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

/// Which team a score change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Away => f.write_str("away"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "home" | "l" => Ok(Self::Local),
            "away" | "visitor" | "a" => Ok(Self::Away),
            other => Err(format!("unknown side '{other}' (expected local or away)")),
        }
    }
}

/// The persisted clock pair: elapsed seconds and whether it is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub seconds: u64,
    pub running: bool,
}

/// The persisted state of one match.
///
/// Field names serialize in camelCase; that JSON shape is the storage
/// contract shared by every backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Unique identifier
    pub id: MatchId,
    pub local_team: String,
    pub away_team: String,
    pub local_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
    /// Administration PIN; never part of [`PublicMatch`]
    pub pin: Pin,
    /// Elapsed seconds at the moment of last persistence
    #[serde(default)]
    pub timer_seconds: u64,
    /// Whether the clock advances from `timer_seconds`
    #[serde(default)]
    pub timer_running: bool,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a scheduled 0-0 match with a stopped clock.
    pub fn new(local_team: &str, away_team: &str, pin: Pin) -> Result<Self> {
        let local_team = required_team_name(local_team, "local")?;
        let away_team = required_team_name(away_team, "away")?;

        Ok(Self {
            id: MatchId::new(),
            local_team,
            away_team,
            local_score: 0,
            away_score: 0,
            status: MatchStatus::Scheduled,
            pin,
            timer_seconds: 0,
            timer_running: false,
            created_at: Utc::now(),
        })
    }

    pub const fn clock_snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            seconds: self.timer_seconds,
            running: self.timer_running,
        }
    }

    /// Read-side projection without the PIN
    pub fn public_view(&self) -> PublicMatch {
        PublicMatch {
            id: self.id.clone(),
            local_team: self.local_team.clone(),
            away_team: self.away_team.clone(),
            local_score: self.local_score,
            away_score: self.away_score,
            status: self.status,
            timer_seconds: self.timer_seconds,
            timer_running: self.timer_running,
            created_at: self.created_at,
        }
    }
}

fn required_team_name(name: &str, side: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidInput(format!(
            "{side} team name cannot be empty"
        )))
    } else {
        Ok(trimmed.to_string())
    }
}

/// What public viewers see of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMatch {
    pub id: MatchId,
    pub local_team: String,
    pub away_team: String,
    pub local_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
    pub timer_seconds: u64,
    pub timer_running: bool,
    pub created_at: DateTime<Utc>,
}

impl PublicMatch {
    pub const fn clock_snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            seconds: self.timer_seconds,
            running: self.timer_running,
        }
    }

    /// `Local 1 - 0 Away` scoreline
    pub fn scoreline(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.local_team, self.local_score, self.away_score, self.away_team
        )
    }
}
