//! Background one-second ticker for a [`MatchClock`].

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{MatchClock, CLOCK_TICK};

/// Owns the task that advances a clock once per period.
///
/// Stopping is explicit via [`ClockTicker::stop`] or implicit on drop, so a
/// torn-down view never leaves a timer behind.
#[derive(Debug)]
pub struct ClockTicker {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ClockTicker {
    /// Tick `clock` every second. Must be called within a tokio runtime.
    pub fn spawn(clock: MatchClock) -> Self {
        Self::spawn_with_period(clock, CLOCK_TICK)
    }

    pub fn spawn_with_period(clock: MatchClock, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        clock.tick();
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("Clock ticker stopped");
                        return;
                    }
                }
            }
        });

        Self {
            shutdown,
            task: Some(task),
        }
    }

    /// Stop ticking and wait for the task to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ClockTicker {
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
    use crate::models::ClockSnapshot;

    fn running_clock(seconds: u64) -> MatchClock {
        MatchClock::from_snapshot(ClockSnapshot {
            seconds,
            running: true,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn advances_once_per_second() {
        let clock = running_clock(0);
        let ticker = ClockTicker::spawn(clock.clone());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(clock.seconds(), 3);

        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn paused_clock_does_not_move() {
        let clock = MatchClock::from_snapshot(ClockSnapshot {
            seconds: 42,
            running: false,
        });
        let _ticker = ClockTicker::spawn(clock.clone());

        tokio::time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(clock.seconds(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_ticker_stops_the_clock() {
        let clock = running_clock(0);
        let ticker = ClockTicker::spawn(clock.clone());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(ticker);
        let frozen = clock.seconds();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(clock.seconds(), frozen);
        assert_eq!(frozen, 2);
    }
}
