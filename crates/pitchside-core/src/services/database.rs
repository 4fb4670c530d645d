//! libSQL match store shared by the CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, LibSqlMatchRepository, SyncConfig};
use crate::models::{MatchId, MatchRecord};
use crate::store::MatchStore;
use crate::Result;

/// Thread-safe libSQL-backed [`MatchStore`].
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl DatabaseService {
    /// Open the store at `db_path`, as a replica of `remote` when given.
    pub async fn open_path(db_path: impl Into<PathBuf>, remote: Option<SyncConfig>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = match remote {
            Some(remote) => {
                tracing::info!("Replicating matches from {}", remote.url);
                Database::open_replica(&db_path, remote).await?
            }
            None => {
                tracing::debug!("Using local match database {}", db_path.display());
                Database::open(&db_path).await?
            }
        };

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory database service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Location on disk, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        self.db_path.as_deref()
    }

    pub async fn is_replicated(&self) -> bool {
        self.db.lock().await.is_replicated()
    }
}

impl MatchStore for DatabaseService {
    async fn get(&self, id: &MatchId) -> Result<Option<MatchRecord>> {
        let db = self.db.lock().await;
        let repo = LibSqlMatchRepository::new(db.connection());
        repo.get(id).await
    }

    async fn list(&self) -> Result<Vec<MatchRecord>> {
        let db = self.db.lock().await;
        let repo = LibSqlMatchRepository::new(db.connection());
        repo.list().await
    }

    async fn upsert(&self, record: &MatchRecord) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlMatchRepository::new(db.connection());
        repo.upsert(record).await?;
        tracing::debug!(match_id = %record.id, "Saved match");
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        self.db.lock().await.sync().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pin;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn new_record() -> MatchRecord {
        let pin: Pin = "1234".parse().unwrap();
        MatchRecord::new("TeamA", "TeamB", pin).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn in_memory_upsert_and_list_roundtrip() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        assert!(!service.is_replicated().await);

        let record = new_record();
        service.upsert(&record).await.unwrap();
        service.refresh().await.unwrap();

        assert_eq!(service.list().await.unwrap(), vec![record.clone()]);
        assert_eq!(service.get(&record.id).await.unwrap(), Some(record));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn file_backed_service_persists_across_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("data").join("pitchside.db");
        let record = new_record();

        {
            let service = DatabaseService::open_path(&path, None).await.unwrap();
            assert_eq!(service.path(), Some(path.as_path()));
            service.upsert(&record).await.unwrap();
        }

        let reopened = DatabaseService::open_path(&path, None).await.unwrap();
        assert_eq!(reopened.get(&record.id).await.unwrap(), Some(record));
    }
}
