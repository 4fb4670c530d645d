//! Single-file JSON match store.
//!
//! The file holds one JSON array of camelCase records, the same layout the
//! browser scoreboard kept under its `matches` storage key, so exported data
//! can be used directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::MatchStore;
use crate::error::{Error, Result};
use crate::models::{MatchId, MatchRecord};

/// Match store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Raw file contents: entries stay as JSON values so unreadable entries
/// written by someone else survive our writes untouched.
enum Contents {
    Entries(Vec<Value>),
    Unreadable(String),
}

impl JsonFileStore {
    /// Store at `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Contents> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Contents::Entries(Vec::new()));
            }
            Err(error) => return Err(error.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Contents::Entries(Vec::new()));
        }

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Ok(Contents::Entries(entries)),
            Err(error) => Ok(Contents::Unreadable(error.to_string())),
        }
    }

    async fn readable_entries(&self) -> Result<Vec<Value>> {
        match self.load().await? {
            Contents::Entries(entries) => Ok(entries),
            Contents::Unreadable(reason) => {
                tracing::warn!(
                    "Ignoring unreadable match file {}: {}",
                    self.path.display(),
                    reason
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, serialized).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn parse_entry(entry: &Value) -> Option<MatchRecord> {
    match serde_json::from_value::<MatchRecord>(entry.clone()) {
        Ok(record) => Some(record),
        Err(error) => {
            tracing::warn!(
                id = entry_id(entry).unwrap_or("<none>"),
                "Skipping malformed match record: {}",
                error
            );
            None
        }
    }
}

impl MatchStore for JsonFileStore {
    async fn get(&self, id: &MatchId) -> Result<Option<MatchRecord>> {
        let entries = self.readable_entries().await?;
        Ok(entries
            .iter()
            .find(|entry| entry_id(entry) == Some(id.as_str()))
            .and_then(parse_entry))
    }

    async fn list(&self) -> Result<Vec<MatchRecord>> {
        let entries = self.readable_entries().await?;
        Ok(entries.iter().filter_map(parse_entry).collect())
    }

    async fn upsert(&self, record: &MatchRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.load().await? {
            Contents::Entries(entries) => entries,
            Contents::Unreadable(reason) => {
                return Err(Error::Persistence(format!(
                    "refusing to overwrite unreadable match file {}: {reason}",
                    self.path.display()
                )));
            }
        };

        let value = serde_json::to_value(record)?;
        match entries
            .iter_mut()
            .find(|entry| entry_id(entry) == Some(record.id.as_str()))
        {
            Some(existing) => *existing = value,
            None => entries.push(value),
        }

        self.write_entries(&entries).await?;
        tracing::debug!(match_id = %record.id, "Saved match to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Pin};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn new_record(local: &str, away: &str) -> MatchRecord {
        let pin: Pin = "0420".parse().unwrap();
        MatchRecord::new(local, away, pin).unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("matches.json"));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.get(&MatchId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn roundtrips_every_field() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("matches.json"));

        let mut record = new_record("TeamA", "TeamB");
        record.away_score = 4;
        record.status = MatchStatus::Halftime;
        record.timer_seconds = 2712;
        store.upsert(&record).await.unwrap();

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.get(&record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn upsert_replaces_and_preserves_insertion_order() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("matches.json"));
        let first = new_record("A", "B");
        let second = new_record("C", "D");
        store.upsert(&first).await.unwrap();
        store.upsert(&second).await.unwrap();

        let mut updated = first.clone();
        updated.local_score = 1;
        store.upsert(&updated).await.unwrap();

        let ids = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|record| (record.id, record.local_score))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![(first.id, 1), (second.id, 0)]);
    }

    #[tokio::test]
    async fn malformed_entry_reads_as_absent_and_survives_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.json");
        std::fs::write(
            &path,
            r#"[{"id": "broken1", "localTeam": "A", "status": "overtime"}]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let broken: MatchId = "broken1".parse().unwrap();
        assert_eq!(store.get(&broken).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());

        let record = new_record("TeamA", "TeamB");
        store.upsert(&record).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("broken1"));
        assert_eq!(store.list().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn unreadable_file_reads_empty_but_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.list().await.unwrap().is_empty());

        let error = store
            .upsert(&new_record("TeamA", "TeamB"))
            .await
            .unwrap_err();
        assert!(error.is_persistence_failure());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn reads_legacy_browser_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "Mlq2x9k0abcde",
                "localTeam": "Rayo",
                "awayTeam": "Betis",
                "localScore": 1,
                "awayScore": 1,
                "status": "second_half",
                "pin": "4821",
                "timerSeconds": 3012,
                "timerRunning": true,
                "createdAt": "2024-05-01T10:00:00.000Z"
            }]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let id: MatchId = "Mlq2x9k0abcde".parse().unwrap();
        let record = store.get(&id).await.unwrap().unwrap();
        assert_eq!(record.local_team, "Rayo");
        assert_eq!(record.status, MatchStatus::SecondHalf);
        assert_eq!(record.clock_snapshot().seconds, 3012);
        assert!(record.timer_running);
    }
}
