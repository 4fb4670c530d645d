//! Database connection management

use crate::error::Result;
use crate::util::normalize_text_option;
use libsql::{Builder, Connection, Database as LibSqlDatabase};
use std::path::Path;

pub const REMOTE_URL_ENV: &str = "TURSO_DATABASE_URL";
pub const AUTH_TOKEN_ENV: &str = "TURSO_AUTH_TOKEN";

/// Remote libSQL database shared by scorer and viewers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Remote database URL (e.g., `libsql://scores.turso.io`)
    pub url: String,
    pub auth_token: String,
}

impl SyncConfig {
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Read the remote from the process environment; `None` unless both
    /// variables are set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = normalize_text_option(env(REMOTE_URL_ENV))?;
        let auth_token = normalize_text_option(env(AUTH_TOKEN_ENV))?;
        Some(Self { url, auth_token })
    }
}

/// libSQL database holding the `matches` table
pub struct Database {
    db: LibSqlDatabase,
    conn: Connection,
    replicated: bool,
}

impl Database {
    /// Open (or create) a local-only database file. Runs migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_string_lossy().to_string();
        let db = Builder::new_local(&path).build().await?;
        Self::init(db, false).await
    }

    /// Open an in-memory database (useful for testing)
    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::init(db, false).await
    }

    /// Open an embedded replica of a remote database.
    ///
    /// Reads are served from the local file; writes go to the remote. Other
    /// processes' writes only become visible after [`Self::sync`].
    pub async fn open_replica(local_path: impl AsRef<Path>, remote: SyncConfig) -> Result<Self> {
        let path = local_path.as_ref().to_string_lossy().to_string();
        let db = Builder::new_remote_replica(&path, remote.url, remote.auth_token)
            .build()
            .await?;
        db.sync().await?;
        tracing::debug!("Initial replica sync complete");
        Self::init(db, true).await
    }

    async fn init(db: LibSqlDatabase, replicated: bool) -> Result<Self> {
        let conn = db.connect()?;
        let database = Self {
            db,
            conn,
            replicated,
        };
        database.configure().await;
        super::migrations::run(&database.conn).await?;
        Ok(database)
    }

    async fn configure(&self) {
        // replicas reject some pragmas; both are optional
        for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
            if let Err(error) = self.conn.execute(pragma, ()).await {
                tracing::debug!("Skipped {}: {}", pragma, error);
            }
        }
    }

    /// Pull remote changes into the replica. No-op for local databases.
    pub async fn sync(&self) -> Result<()> {
        if self.replicated {
            self.db.sync().await?;
            tracing::debug!("Replica synced");
        }
        Ok(())
    }

    pub const fn is_replicated(&self) -> bool {
        self.replicated
    }

    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(!db.is_replicated());
        db.sync().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_file_creates_schema() {
        let tmp = tempdir().unwrap();
        let db = Database::open(tmp.path().join("pitchside.db")).await.unwrap();

        let mut rows = db
            .connection()
            .query(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'matches')",
                (),
            )
            .await
            .unwrap();
        let exists = rows
            .next()
            .await
            .unwrap()
            .is_some_and(|row| row.get::<i32>(0).unwrap() != 0);
        assert!(exists);
    }

    #[test]
    fn test_sync_config_needs_both_variables() {
        let both = |key: &str| match key {
            REMOTE_URL_ENV => Some("libsql://scores.turso.io".to_string()),
            AUTH_TOKEN_ENV => Some("token".to_string()),
            _ => None,
        };
        assert_eq!(
            SyncConfig::from_lookup(both),
            Some(SyncConfig::new("libsql://scores.turso.io", "token"))
        );

        let url_only = |key: &str| (key == REMOTE_URL_ENV).then(|| "libsql://x".to_string());
        assert_eq!(SyncConfig::from_lookup(url_only), None);

        let blank_token = |key: &str| match key {
            REMOTE_URL_ENV => Some("libsql://x".to_string()),
            _ => Some("  ".to_string()),
        };
        assert_eq!(SyncConfig::from_lookup(blank_token), None);
    }
}
