//! Consecutive-day study streak tracking.
//!
//! The streak is a singleton value advanced once per completed study session.
//! Transitions work at calendar-day granularity: finishing a second session
//! on the same day never double-counts, a one-day gap extends the streak, and
//! any longer gap resets it to one.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Streak state. Invariant: `best_streak >= current_streak` after any
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStreak {
    /// Consecutive days with at least one completed session
    pub current_streak: u32,
    /// Highest `current_streak` ever reached
    pub best_streak: u32,
    /// Day of the most recent counted session (midnight UTC)
    pub last_study_date: DateTime<Utc>,
}

impl StudyStreak {
    /// A fresh streak with no history.
    pub fn new(now: DateTime<Utc>) -> Self {
        StudyStreak {
            current_streak: 0,
            best_streak: 0,
            last_study_date: now,
        }
    }

    /// Advance the streak for a session completed at `completed_at`.
    ///
    /// Day-diff semantics relative to the last study day:
    /// - `0`: unchanged, except a zero streak becomes 1 (starting today
    ///   counts as day one; never a second increment on the same day)
    /// - `1`: current streak increments
    /// - `> 1`: current streak resets to 1
    /// - `< 0`: out-of-order completion (clock skew); counters untouched and
    ///   the last-study marker never moves backward
    pub fn advance(&self, completed_at: DateTime<Utc>) -> StudyStreak {
        let session_day = completed_at.date_naive();
        let last_day = self.last_study_date.date_naive();
        let day_diff = (session_day - last_day).num_days();

        if day_diff < 0 {
            return self.clone();
        }

        let current = if day_diff == 0 {
            if self.current_streak == 0 {
                1
            } else {
                self.current_streak
            }
        } else if day_diff == 1 {
            self.current_streak + 1
        } else {
            1
        };

        StudyStreak {
            current_streak: current,
            best_streak: self.best_streak.max(current),
            last_study_date: midnight(session_day),
        }
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
