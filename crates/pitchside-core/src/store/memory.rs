//! In-process match store

use std::sync::Arc;

use tokio::sync::Mutex;

use super::MatchStore;
use crate::error::Result;
use crate::models::{MatchId, MatchRecord};

/// Process-local store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryMatchStore {
    records: Arc<Mutex<Vec<MatchRecord>>>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    async fn get(&self, id: &MatchId) -> Result<Option<MatchRecord>> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn upsert(&self, record: &MatchRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        if let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Pin};
    use pretty_assertions::assert_eq;

    fn new_record(local: &str, away: &str) -> MatchRecord {
        let pin: Pin = "1234".parse().unwrap();
        MatchRecord::new(local, away, pin).unwrap()
    }

    #[tokio::test]
    async fn upsert_then_get_roundtrips_every_field() {
        let store = MemoryMatchStore::new();
        let mut record = new_record("TeamA", "TeamB");
        record.local_score = 3;
        record.status = MatchStatus::SecondHalf;
        record.timer_seconds = 3100;
        record.timer_running = true;

        store.upsert(&record).await.unwrap();
        assert_eq!(store.get(&record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn upsert_replaces_in_place_and_keeps_order() {
        let store = MemoryMatchStore::new();
        let first = new_record("A", "B");
        let second = new_record("C", "D");
        store.upsert(&first).await.unwrap();
        store.upsert(&second).await.unwrap();

        let mut changed = first.clone();
        changed.away_score = 2;
        store.upsert(&changed).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![changed, second]);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = MemoryMatchStore::new();
        assert_eq!(store.get(&MatchId::new()).await.unwrap(), None);
    }
}
