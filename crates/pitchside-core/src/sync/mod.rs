//! Read-side polling of one match.
//!
//! A [`SyncReader`] fetches the record from the store on a fixed period and
//! replaces its held snapshot wholesale. It never writes to the store.

mod handle;

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::clock::MatchClock;
use crate::models::{ClockSnapshot, MatchId, PublicMatch};
use crate::store::MatchStore;

pub use handle::SyncHandle;

/// Period between two store fetches
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Outcome of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncUpdate {
    /// The record was found; this is the new snapshot.
    Snapshot(PublicMatch),
    /// No readable record exists for the id.
    NotFound,
    /// The fetch failed; the previous snapshot is kept.
    Unchanged,
}

/// Lazy, restartable sequence of public snapshots for one match id.
pub struct SyncReader<S: MatchStore> {
    store: S,
    id: MatchId,
    period: Duration,
    clock: MatchClock,
    snapshot: Option<PublicMatch>,
    timer: Option<Interval>,
}

impl<S: MatchStore> SyncReader<S> {
    pub fn new(store: S, id: MatchId) -> Self {
        Self {
            store,
            id,
            period: POLL_INTERVAL,
            clock: MatchClock::default(),
            snapshot: None,
            timer: None,
        }
    }

    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self.timer = None;
        self
    }

    pub const fn id(&self) -> &MatchId {
        &self.id
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Latest snapshot, `None` before the first successful fetch or after a
    /// not-found poll.
    pub const fn snapshot(&self) -> Option<&PublicMatch> {
        self.snapshot.as_ref()
    }

    /// Local display clock, reset from every fetched snapshot.
    pub const fn clock(&self) -> &MatchClock {
        &self.clock
    }

    /// Fetch now, outside the periodic schedule.
    pub async fn poll_once(&mut self) -> SyncUpdate {
        if let Err(error) = self.store.refresh().await {
            tracing::warn!(match_id = %self.id, "Store refresh failed: {}", error);
        }

        match self.store.get(&self.id).await {
            Ok(Some(record)) => {
                let view = record.public_view();
                self.apply(view.clone());
                tracing::debug!(match_id = %self.id, status = %view.status, "Polled match");
                SyncUpdate::Snapshot(view)
            }
            Ok(None) => {
                tracing::debug!(match_id = %self.id, "Polled match: not found");
                self.snapshot = None;
                self.clock.resync(ClockSnapshot::default());
                SyncUpdate::NotFound
            }
            Err(error) => {
                tracing::warn!(match_id = %self.id, "Failed to fetch match: {}", error);
                SyncUpdate::Unchanged
            }
        }
    }

    /// Wait for the next scheduled poll and run it. The first call after
    /// construction or [`Self::restart`] polls immediately.
    pub async fn next(&mut self) -> SyncUpdate {
        let period = self.period;
        let timer = self.timer.get_or_insert_with(|| {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });
        timer.tick().await;
        self.poll_once().await
    }

    /// Start the schedule over; the next poll happens immediately.
    pub fn restart(&mut self) {
        self.timer = None;
    }

    /// Run the reader in the background. Requires a tokio runtime.
    pub fn spawn(self) -> SyncHandle
    where
        S: 'static,
    {
        SyncHandle::spawn(self)
    }

    fn apply(&mut self, view: PublicMatch) {
        self.clock.resync(view.clock_snapshot());
        self.snapshot = Some(view);
    }
}
