//! Background driver for a [`SyncReader`].

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{SyncReader, SyncUpdate};
use crate::clock::{ClockTicker, MatchClock};
use crate::models::PublicMatch;
use crate::store::MatchStore;

/// A running public view: the poll loop plus the local clock ticker.
///
/// The latest snapshot is published through a watch channel; `None` means
/// nothing has been found (yet). Both loops stop on [`Self::shutdown`] or
/// when the handle is dropped.
pub struct SyncHandle {
    snapshot: watch::Receiver<Option<PublicMatch>>,
    clock: MatchClock,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    ticker: Option<ClockTicker>,
}

impl SyncHandle {
    pub(super) fn spawn<S: MatchStore + 'static>(mut reader: SyncReader<S>) -> Self {
        let clock = reader.clock().clone();
        let ticker = ClockTicker::spawn(clock.clone());
        let (snapshot_tx, snapshot) = watch::channel(reader.snapshot().cloned());
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let match_id = reader.id().clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = reader.next() => match update {
                        SyncUpdate::Snapshot(view) => {
                            snapshot_tx.send_replace(Some(view));
                        }
                        SyncUpdate::NotFound => {
                            snapshot_tx.send_replace(None);
                        }
                        SyncUpdate::Unchanged => {}
                    },
                    _ = shutdown_rx.changed() => {
                        tracing::debug!(match_id = %match_id, "Sync reader stopped");
                        return;
                    }
                }
            }
        });

        Self {
            snapshot,
            clock,
            shutdown,
            task: Some(task),
            ticker: Some(ticker),
        }
    }

    /// Latest published snapshot
    pub fn current(&self) -> Option<PublicMatch> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified after every poll that found or lost the match.
    pub fn subscribe(&self) -> watch::Receiver<Option<PublicMatch>> {
        self.snapshot.clone()
    }

    /// Locally ticking clock for display between polls.
    pub const fn clock(&self) -> &MatchClock {
        &self.clock
    }

    /// Stop polling and ticking, waiting for both tasks to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.stop().await;
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchRecord, MatchStatus, Pin};
    use crate::store::MemoryMatchStore;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn running_record(seconds: u64) -> MatchRecord {
        let pin: Pin = "1234".parse().unwrap();
        let mut record = MatchRecord::new("TeamA", "TeamB", pin).unwrap();
        record.status = MatchStatus::FirstHalf;
        record.timer_seconds = seconds;
        record.timer_running = true;
        record
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_snapshots_and_ticks_clock() {
        let store = MemoryMatchStore::new();
        let mut record = running_record(10);
        store.upsert(&record).await.unwrap();

        let handle = SyncReader::new(store.clone(), record.id.clone()).spawn();
        let mut updates = handle.subscribe();

        updates.changed().await.unwrap();
        let first = updates.borrow_and_update().clone().unwrap();
        assert_eq!(first.timer_seconds, 10);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(handle.clock().seconds(), 12);

        record.away_score = 2;
        store.upsert(&record).await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(handle.current().map(|view| view.away_score), Some(2));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_none_for_missing_match() {
        let store = MemoryMatchStore::new();
        let handle = SyncReader::new(store, crate::models::MatchId::new()).spawn();
        let mut updates = handle.subscribe();

        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow(), None);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_the_clock() {
        let store = MemoryMatchStore::new();
        let record = running_record(0);
        store.upsert(&record).await.unwrap();

        let handle = SyncReader::new(store, record.id.clone()).spawn();
        let mut updates = handle.subscribe();
        updates.changed().await.unwrap();
        let clock = handle.clock().clone();
        drop(handle);

        let stopped_at = clock.seconds();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(clock.seconds(), stopped_at);
    }
}
