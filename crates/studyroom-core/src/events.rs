use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{StepKind, TimerState};

/// Every timer state change produces an Event. Frontends poll for events or
/// render the periodic snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        step_index: usize,
        step_kind: StepKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The current step ran out. A completed focus step is the signal to
    /// record a study session for its duration.
    TimerCompleted {
        step_index: usize,
        step_kind: StepKind,
        duration_min: u64,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from_step: usize,
        to_step: usize,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        step_index: usize,
        step_kind: StepKind,
        step_label: String,
        remaining_ms: u64,
        total_ms: u64,
        schedule_progress_pct: f64,
        at: DateTime<Utc>,
    },
}
