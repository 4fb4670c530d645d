//! Administrator session: the single writer of one match.

use crate::access;
use crate::clock::{ClockTicker, MatchClock};
use crate::error::{Error, Result};
use crate::lifecycle;
use crate::models::{ClockSnapshot, MatchId, MatchRecord, MatchStatus, PublicMatch, Side};
use crate::store::MatchStore;

/// A PIN-unlocked view of one match that applies lifecycle operations and
/// persists each result.
///
/// Every operation reads the live clock, computes the next record with the
/// pure lifecycle engine and writes it. The session only adopts the new
/// record after the write succeeds, so a failed write leaves it unchanged.
pub struct AdminSession<S: MatchStore> {
    store: S,
    record: MatchRecord,
    clock: MatchClock,
}

impl<S: MatchStore> AdminSession<S> {
    /// Load `id` fresh from the store and check `pin` against it.
    pub async fn unlock(store: S, id: &MatchId, pin: &str) -> Result<Self> {
        let record = store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        access::require(&record, pin)?;

        tracing::info!(match_id = %record.id, "Admin session unlocked");
        let clock = MatchClock::from_snapshot(record.clock_snapshot());
        Ok(Self {
            store,
            record,
            clock,
        })
    }

    pub const fn record(&self) -> &MatchRecord {
        &self.record
    }

    /// The live display clock; tick it with [`Self::spawn_ticker`].
    pub const fn clock(&self) -> &MatchClock {
        &self.clock
    }

    /// What viewers would see right now, with the live clock value.
    pub fn public_view(&self) -> PublicMatch {
        let mut view = self.record.public_view();
        let live = self.clock.snapshot();
        view.timer_seconds = live.seconds;
        view.timer_running = live.running;
        view
    }

    /// Start the one-second local tick. Dropping the ticker stops it.
    pub fn spawn_ticker(&self) -> ClockTicker {
        ClockTicker::spawn(self.clock.clone())
    }

    pub async fn transition(&mut self, target: MatchStatus) -> Result<&MatchRecord> {
        let read_at = self.clock.seconds();
        let updated = lifecycle::transition(&self.record, target, read_at)?;
        self.commit(updated, Some(read_at)).await?;
        tracing::info!(match_id = %self.record.id, status = %target, "Match status changed");
        Ok(&self.record)
    }

    pub async fn adjust_score(&mut self, side: Side, delta: i64) -> Result<&MatchRecord> {
        let updated = lifecycle::adjust_score(&self.record, side, delta, self.clock.seconds());
        // the running counter is already at or past the snapshot
        self.commit(updated, None).await?;
        Ok(&self.record)
    }

    pub async fn start_clock(&mut self) -> Result<&MatchRecord> {
        let read_at = self.clock.seconds();
        let updated = lifecycle::start_clock(&self.record, read_at)?;
        self.commit(updated, Some(read_at)).await?;
        Ok(&self.record)
    }

    pub async fn pause_clock(&mut self) -> Result<&MatchRecord> {
        let read_at = self.clock.seconds();
        let updated = lifecycle::pause_clock(&self.record, read_at);
        self.commit(updated, Some(read_at)).await?;
        Ok(&self.record)
    }

    pub async fn toggle_clock(&mut self) -> Result<&MatchRecord> {
        let read_at = self.clock.seconds();
        let updated = lifecycle::toggle_clock(&self.record, read_at)?;
        self.commit(updated, Some(read_at)).await?;
        Ok(&self.record)
    }

    pub async fn reset_clock(&mut self) -> Result<&MatchRecord> {
        let read_at = self.clock.seconds();
        let updated = lifecycle::reset_clock(&self.record);
        self.commit(updated, Some(read_at)).await?;
        Ok(&self.record)
    }

    /// Persist `updated`, then adopt it. `read_at` is the clock value the
    /// operation was computed from; `None` leaves the clock alone.
    async fn commit(&mut self, updated: MatchRecord, read_at: Option<u64>) -> Result<()> {
        if let Err(error) = self.store.upsert(&updated).await {
            tracing::warn!(match_id = %updated.id, "Failed to save match: {}", error);
            return Err(error);
        }

        self.record = updated;
        if let Some(read_at) = read_at {
            let written = self.record.clock_snapshot();
            if written.running && self.clock.is_running() && written.seconds == read_at {
                // still running from the same value: keep ticks counted during the write
                self.clock.resync(ClockSnapshot {
                    seconds: self.clock.seconds().max(read_at),
                    running: true,
                });
            } else {
                self.clock.resync(written);
            }
        }
        Ok(())
    }
}
