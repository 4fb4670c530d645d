use pitchside_core::db::SyncConfig;
use pitchside_core::{
    format_clock, DatabaseService, JsonFileStore, MatchId, MatchRecord, MatchStore, PublicMatch,
    StoreKind,
};

use crate::config::Settings;
use crate::error::CliError;

/// The configured store backend.
#[derive(Clone)]
pub enum AppStore {
    Database(DatabaseService),
    Json(JsonFileStore),
}

impl MatchStore for AppStore {
    async fn get(&self, id: &MatchId) -> pitchside_core::Result<Option<MatchRecord>> {
        match self {
            Self::Database(db) => db.get(id).await,
            Self::Json(file) => file.get(id).await,
        }
    }

    async fn list(&self) -> pitchside_core::Result<Vec<MatchRecord>> {
        match self {
            Self::Database(db) => db.list().await,
            Self::Json(file) => file.list().await,
        }
    }

    async fn upsert(&self, record: &MatchRecord) -> pitchside_core::Result<()> {
        match self {
            Self::Database(db) => db.upsert(record).await,
            Self::Json(file) => file.upsert(record).await,
        }
    }

    async fn refresh(&self) -> pitchside_core::Result<()> {
        match self {
            Self::Database(db) => db.refresh().await,
            Self::Json(file) => file.refresh().await,
        }
    }
}

pub async fn open_store(settings: &Settings) -> Result<AppStore, CliError> {
    let store = match settings.store {
        StoreKind::Sqlite => {
            let db = DatabaseService::open_path(&settings.db_path, SyncConfig::from_env()).await?;
            AppStore::Database(db)
        }
        StoreKind::Json => {
            if let Some(parent) = settings.db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            AppStore::Json(JsonFileStore::new(&settings.db_path))
        }
    };
    tracing::debug!(
        store = %settings.store,
        "Opened match store at {}",
        settings.db_path.display()
    );
    Ok(store)
}

pub fn parse_match_id(value: &str) -> Result<MatchId, CliError> {
    let value = value.trim();
    value
        .parse::<MatchId>()
        .map_err(|_| CliError::InvalidMatchId(value.to_string()))
}

/// Load a match for public display or fail with a not-found error.
pub async fn load_public_match<S: MatchStore>(
    store: &S,
    id: &MatchId,
) -> Result<PublicMatch, CliError> {
    store
        .get(id)
        .await?
        .map(|record| record.public_view())
        .ok_or_else(|| CliError::MatchNotFound(id.to_string()))
}

const HIDDEN_CLOCK: &str = "--:--";

/// One scoreboard line, e.g. `1st Half   02:05  TeamA 1 - 0 TeamB`. The
/// clock is only shown while a half is in play.
pub fn scoreboard_line(view: &PublicMatch, clock_seconds: u64) -> String {
    let clock = if view.status.is_live() {
        format_clock(clock_seconds)
    } else {
        HIDDEN_CLOCK.to_string()
    };
    format!("{:<10} {clock}  {}", view.status.label(), view.scoreline())
}

pub fn format_match_lines(matches: &[PublicMatch]) -> Vec<String> {
    if matches.is_empty() {
        return vec!["No matches yet.".to_string()];
    }

    matches
        .iter()
        .map(|view| format!("{}  {}", view.id, scoreboard_line(view, view.timer_seconds)))
        .collect()
}
