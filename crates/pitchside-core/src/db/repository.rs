//! Match repository implementation

use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Row};

use crate::error::{Error, Result};
use crate::models::{MatchId, MatchRecord};

const SELECT_COLUMNS: &str = "SELECT id, local_team, away_team, local_score, away_score, status, pin, timer_seconds, timer_running, created_at FROM matches";

/// libSQL access to the `matches` table
pub struct LibSqlMatchRepository<'a> {
    conn: &'a Connection,
}

/// Column values as stored, before validation
struct StoredRow {
    id: String,
    local_team: String,
    away_team: String,
    local_score: i64,
    away_score: i64,
    status: String,
    pin: String,
    timer_seconds: i64,
    timer_running: i64,
    created_at: String,
}

impl StoredRow {
    fn read(row: &Row) -> libsql::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            local_team: row.get(1)?,
            away_team: row.get(2)?,
            local_score: row.get(3)?,
            away_score: row.get(4)?,
            status: row.get(5)?,
            pin: row.get(6)?,
            timer_seconds: row.get(7)?,
            timer_running: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_record(self) -> std::result::Result<MatchRecord, String> {
        let score = |value: i64, column: &str| {
            u32::try_from(value).map_err(|_| format!("{column} out of range: {value}"))
        };

        Ok(MatchRecord {
            id: self.id.parse()?,
            local_score: score(self.local_score, "local_score")?,
            away_score: score(self.away_score, "away_score")?,
            local_team: self.local_team,
            away_team: self.away_team,
            status: self.status.parse()?,
            pin: self.pin.parse()?,
            timer_seconds: u64::try_from(self.timer_seconds)
                .map_err(|_| format!("timer_seconds out of range: {}", self.timer_seconds))?,
            timer_running: self.timer_running != 0,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|error| format!("invalid created_at: {error}"))?
                .with_timezone(&Utc),
        })
    }
}

impl<'a> LibSqlMatchRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a row; malformed rows are logged and treated as absent.
    fn parse_row(row: &Row) -> Option<MatchRecord> {
        let parsed = StoredRow::read(row)
            .map_err(|error| error.to_string())
            .and_then(StoredRow::into_record);

        match parsed {
            Ok(record) => Some(record),
            Err(reason) => {
                let id = row.get::<String>(0).unwrap_or_default();
                tracing::warn!(match_id = %id, "Skipping malformed match row: {}", reason);
                None
            }
        }
    }

    pub async fn get(&self, id: &MatchId) -> Result<Option<MatchRecord>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), libsql::params![id.as_str()])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Self::parse_row(&row)),
            None => Ok(None),
        }
    }

    /// All readable matches, oldest insert first
    pub async fn list(&self) -> Result<Vec<MatchRecord>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} ORDER BY rowid ASC"), ())
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            if let Some(record) = Self::parse_row(&row) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Insert or fully replace the row for `record.id`
    pub async fn upsert(&self, record: &MatchRecord) -> Result<()> {
        let timer_seconds = i64::try_from(record.timer_seconds).map_err(|_| {
            Error::InvalidInput(format!(
                "timer_seconds too large to store: {}",
                record.timer_seconds
            ))
        })?;

        self.conn
            .execute(
                "INSERT INTO matches (
                    id, local_team, away_team, local_score, away_score,
                    status, pin, timer_seconds, timer_running, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                    local_team = excluded.local_team,
                    away_team = excluded.away_team,
                    local_score = excluded.local_score,
                    away_score = excluded.away_score,
                    status = excluded.status,
                    pin = excluded.pin,
                    timer_seconds = excluded.timer_seconds,
                    timer_running = excluded.timer_running,
                    created_at = excluded.created_at",
                libsql::params![
                    record.id.to_string(),
                    record.local_team.clone(),
                    record.away_team.clone(),
                    i64::from(record.local_score),
                    i64::from(record.away_score),
                    record.status.as_str().to_string(),
                    record.pin.to_string(),
                    timer_seconds,
                    i64::from(record.timer_running),
                    record
                        .created_at
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                ],
            )
            .await?;

        Ok(())
    }
}
