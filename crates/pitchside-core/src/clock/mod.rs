//! Local match clock.
//!
//! The persisted [`ClockSnapshot`] is the source of truth; [`MatchClock`] is
//! the display counter derived from it. The counter is reset from every
//! loaded or written snapshot and otherwise only moves forward, one second
//! per tick, while running.

mod ticker;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::models::ClockSnapshot;

pub use ticker::ClockTicker;

/// Period of the local display tick
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Shared local clock counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct MatchClock {
    inner: Arc<ClockState>,
}

#[derive(Debug, Default)]
struct ClockState {
    seconds: AtomicU64,
    running: AtomicBool,
}

impl MatchClock {
    /// Clock initialized from a persisted snapshot
    pub fn from_snapshot(snapshot: ClockSnapshot) -> Self {
        let clock = Self::default();
        clock.resync(snapshot);
        clock
    }

    pub fn seconds(&self) -> u64 {
        self.inner.seconds.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            seconds: self.seconds(),
            running: self.is_running(),
        }
    }

    /// Count one elapsed second if running. Returns the value after the tick.
    pub fn tick(&self) -> u64 {
        if self.is_running() {
            self.inner.seconds.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            self.seconds()
        }
    }

    /// Count `seconds` elapsed seconds at once if running.
    pub fn advance(&self, seconds: u64) -> u64 {
        if self.is_running() {
            self.inner.seconds.fetch_add(seconds, Ordering::AcqRel) + seconds
        } else {
            self.seconds()
        }
    }

    /// Replace the counter with a freshly loaded or written snapshot.
    pub fn resync(&self, snapshot: ClockSnapshot) {
        self.inner.seconds.store(snapshot.seconds, Ordering::Release);
        self.inner.running.store(snapshot.running, Ordering::Release);
    }

    /// `MM:SS` rendering of the current value
    pub fn display(&self) -> String {
        format_clock(self.seconds())
    }
}

/// Render seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
