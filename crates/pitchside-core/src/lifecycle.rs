//! Match lifecycle engine.
//!
//! Pure record transforms: every function borrows the current record and
//! returns a complete updated copy, or an error with the input untouched.
//! Persisting the result is the caller's job.
//!
//! Allowed status transitions:
//!
//! | from          | to            | clock effect               |
//! |---------------|---------------|----------------------------|
//! | `scheduled`   | `first_half`  | reset to 0, start          |
//! | `first_half`  | `halftime`    | stop, snapshot             |
//! | `halftime`    | `second_half` | start from snapshot        |
//! | any but final | `finished`    | stop, snapshot             |

use crate::error::{Error, Result};
use crate::models::{MatchRecord, MatchStatus, Side};

/// Whether `from -> to` is in the transition table.
pub const fn can_transition(from: MatchStatus, to: MatchStatus) -> bool {
    use MatchStatus::{FirstHalf, Finished, Halftime, Scheduled, SecondHalf};

    matches!(
        (from, to),
        (Scheduled, FirstHalf)
            | (FirstHalf, Halftime)
            | (Halftime, SecondHalf)
            | (Scheduled | FirstHalf | Halftime | SecondHalf, Finished)
    )
}

/// Move a match to `target`, applying the clock side effect of the
/// transition. `now_seconds` is the clock value currently on display.
pub fn transition(
    record: &MatchRecord,
    target: MatchStatus,
    now_seconds: u64,
) -> Result<MatchRecord> {
    if !can_transition(record.status, target) {
        return Err(Error::InvalidTransition {
            from: record.status,
            to: target,
        });
    }

    let mut updated = record.clone();
    updated.status = target;

    match target {
        MatchStatus::FirstHalf => {
            updated.timer_seconds = 0;
            updated.timer_running = true;
        }
        MatchStatus::SecondHalf => {
            updated.timer_seconds = now_seconds;
            updated.timer_running = true;
        }
        MatchStatus::Halftime | MatchStatus::Finished => {
            updated.timer_seconds = now_seconds;
            updated.timer_running = false;
        }
        MatchStatus::Scheduled => {}
    }

    Ok(updated)
}

/// Apply `delta` goals to one side, clamped at zero.
///
/// Status and running flag are left alone; the displayed clock value is
/// re-snapshotted so a score write never rewinds the persisted clock.
pub fn adjust_score(
    record: &MatchRecord,
    side: Side,
    delta: i64,
    now_seconds: u64,
) -> MatchRecord {
    let mut updated = record.clone();
    let score = match side {
        Side::Local => &mut updated.local_score,
        Side::Away => &mut updated.away_score,
    };
    *score = apply_delta(*score, delta);
    updated.timer_seconds = now_seconds;
    updated
}

fn apply_delta(score: u32, delta: i64) -> u32 {
    let next = i64::from(score).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}

/// Start the clock from `now_seconds`.
pub fn start_clock(record: &MatchRecord, now_seconds: u64) -> Result<MatchRecord> {
    if record.status.is_terminal() {
        return Err(Error::MatchFinished);
    }
    Ok(with_clock(record, now_seconds, true))
}

/// Stop the clock at `now_seconds`.
pub fn pause_clock(record: &MatchRecord, now_seconds: u64) -> MatchRecord {
    with_clock(record, now_seconds, false)
}

/// Flip the running flag outside of a status transition.
pub fn toggle_clock(record: &MatchRecord, now_seconds: u64) -> Result<MatchRecord> {
    if record.timer_running {
        Ok(pause_clock(record, now_seconds))
    } else {
        start_clock(record, now_seconds)
    }
}

/// Zero and stop the clock.
pub fn reset_clock(record: &MatchRecord) -> MatchRecord {
    with_clock(record, 0, false)
}

fn with_clock(record: &MatchRecord, seconds: u64, running: bool) -> MatchRecord {
    let mut updated = record.clone();
    updated.timer_seconds = seconds;
    updated.timer_running = running;
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockSnapshot, Pin};
    use pretty_assertions::assert_eq;

    fn record_in(status: MatchStatus, seconds: u64, running: bool) -> MatchRecord {
        let pin: Pin = "1234".parse().unwrap();
        let mut record = MatchRecord::new("TeamA", "TeamB", pin).unwrap();
        record.status = status;
        record.timer_seconds = seconds;
        record.timer_running = running;
        record
    }

    #[test]
    fn kickoff_resets_and_starts_clock() {
        let record = record_in(MatchStatus::Scheduled, 42, false);
        let updated = transition(&record, MatchStatus::FirstHalf, 42).unwrap();
        assert_eq!(updated.status, MatchStatus::FirstHalf);
        assert_eq!(
            updated.clock_snapshot(),
            ClockSnapshot {
                seconds: 0,
                running: true
            }
        );
    }

    #[test]
    fn halftime_stops_and_snapshots() {
        let record = record_in(MatchStatus::FirstHalf, 0, true);
        let updated = transition(&record, MatchStatus::Halftime, 2700).unwrap();
        assert_eq!(
            updated.clock_snapshot(),
            ClockSnapshot {
                seconds: 2700,
                running: false
            }
        );
    }

    #[test]
    fn second_half_resumes_without_reset() {
        let record = record_in(MatchStatus::Halftime, 2700, false);
        let updated = transition(&record, MatchStatus::SecondHalf, 2700).unwrap();
        assert_eq!(
            updated.clock_snapshot(),
            ClockSnapshot {
                seconds: 2700,
                running: true
            }
        );
    }

    #[test]
    fn finishing_stops_and_snapshots_from_any_open_state() {
        for status in [
            MatchStatus::Scheduled,
            MatchStatus::FirstHalf,
            MatchStatus::Halftime,
            MatchStatus::SecondHalf,
        ] {
            let record = record_in(status, 10, true);
            let updated = transition(&record, MatchStatus::Finished, 5400).unwrap();
            assert_eq!(updated.status, MatchStatus::Finished);
            assert_eq!(
                updated.clock_snapshot(),
                ClockSnapshot {
                    seconds: 5400,
                    running: false
                }
            );
        }
    }

    #[test]
    fn finished_is_terminal() {
        let record = record_in(MatchStatus::Finished, 5400, false);
        for target in MatchStatus::ALL {
            let result = transition(&record, target, 5400);
            assert!(
                matches!(result, Err(Error::InvalidTransition { from: MatchStatus::Finished, to }) if to == target),
                "finished -> {target} should be rejected"
            );
        }
    }

    #[test]
    fn transitions_outside_the_table_are_rejected() {
        let rejected = [
            (MatchStatus::Scheduled, MatchStatus::Halftime),
            (MatchStatus::Scheduled, MatchStatus::SecondHalf),
            (MatchStatus::Scheduled, MatchStatus::Scheduled),
            (MatchStatus::FirstHalf, MatchStatus::FirstHalf),
            (MatchStatus::FirstHalf, MatchStatus::SecondHalf),
            (MatchStatus::Halftime, MatchStatus::FirstHalf),
            (MatchStatus::SecondHalf, MatchStatus::Halftime),
            (MatchStatus::SecondHalf, MatchStatus::Scheduled),
        ];
        for (from, to) in rejected {
            let record = record_in(from, 30, true);
            assert!(transition(&record, to, 99).is_err(), "{from} -> {to}");
            assert_eq!(record.status, from);
            assert_eq!(record.timer_seconds, 30);
        }
    }

    #[test]
    fn score_never_goes_negative() {
        let record = record_in(MatchStatus::FirstHalf, 0, true);
        let updated = adjust_score(&record, Side::Local, -1000, 10);
        assert_eq!(updated.local_score, 0);

        let scored = adjust_score(&record, Side::Away, 3, 10);
        let corrected = adjust_score(&scored, Side::Away, -1, 11);
        assert_eq!(corrected.away_score, 2);
        assert_eq!(corrected.local_score, 0);
    }

    #[test]
    fn score_change_resnapshots_clock_only() {
        let record = record_in(MatchStatus::FirstHalf, 0, true);
        let updated = adjust_score(&record, Side::Local, 1, 125);
        assert_eq!(updated.local_score, 1);
        assert_eq!(updated.timer_seconds, 125);
        assert!(updated.timer_running);
        assert_eq!(updated.status, MatchStatus::FirstHalf);
    }

    #[test]
    fn score_delta_saturates() {
        assert_eq!(apply_delta(u32::MAX, i64::MAX), u32::MAX);
        assert_eq!(apply_delta(5, i64::MIN), 0);
    }

    #[test]
    fn toggle_flips_running_and_keeps_value() {
        let record = record_in(MatchStatus::FirstHalf, 60, true);
        let paused = toggle_clock(&record, 75).unwrap();
        assert_eq!(
            paused.clock_snapshot(),
            ClockSnapshot {
                seconds: 75,
                running: false
            }
        );
        let resumed = toggle_clock(&paused, 75).unwrap();
        assert!(resumed.timer_running);
        assert_eq!(resumed.timer_seconds, 75);
    }

    #[test]
    fn reset_zeroes_and_stops() {
        let record = record_in(MatchStatus::SecondHalf, 3000, true);
        let reset = reset_clock(&record);
        assert_eq!(reset.clock_snapshot(), ClockSnapshot::default());
        assert_eq!(reset.status, MatchStatus::SecondHalf);
    }

    #[test]
    fn finished_clock_cannot_restart() {
        let record = record_in(MatchStatus::Finished, 5400, false);
        assert!(matches!(
            start_clock(&record, 5400),
            Err(Error::MatchFinished)
        ));
        assert!(matches!(
            toggle_clock(&record, 5400),
            Err(Error::MatchFinished)
        ));
        assert_eq!(reset_clock(&record).timer_seconds, 0);
    }
}
