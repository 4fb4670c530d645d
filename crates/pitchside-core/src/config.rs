//! Settings shared by every front-end: which store backend to use and the
//! public origin share links are built on.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sync::POLL_INTERVAL;
use crate::util::{is_http_url, normalize_text_option};

/// Origin used for share links when none is configured
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";

/// File name of the database inside the data directory
pub const DEFAULT_DB_FILE: &str = "pitchside.db";

/// File name of the JSON store inside the data directory
pub const DEFAULT_JSON_FILE: &str = "matches.json";

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// libSQL database file, optionally synced with Turso
    #[default]
    Sqlite,
    /// One JSON array file holding every match
    Json,
}

impl StoreKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
        }
    }

    /// Default file name for this backend's data file
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Sqlite => DEFAULT_DB_FILE,
            Self::Json => DEFAULT_JSON_FILE,
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "libsql" | "db" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown store '{other}' (expected 'sqlite' or 'json')"
            )),
        }
    }
}

/// Validate a public origin and strip trailing slashes.
pub fn normalize_origin(value: &str) -> Result<String, String> {
    let Some(origin) = normalize_text_option(Some(value.to_string())) else {
        return Err("public origin must not be empty".to_string());
    };
    if !is_http_url(&origin) {
        return Err(format!(
            "public origin must start with http:// or https:// (got '{origin}')"
        ));
    }
    Ok(origin.trim_end_matches('/').to_string())
}

/// Poll period from a configured number of seconds; zero falls back to the
/// default.
pub const fn poll_interval_from_secs(seconds: u64) -> Duration {
    if seconds == 0 {
        POLL_INTERVAL
    } else {
        Duration::from_secs(seconds)
    }
}
