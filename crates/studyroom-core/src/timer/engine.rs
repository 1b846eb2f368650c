//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically. The engine serializes to JSON so frontends can persist it
//! between invocations.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed -> (next step) Running
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::schedule::{Schedule, StepKind};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core timer engine.
///
/// Operates on wall-clock deltas -- no internal thread. The caller is
/// responsible for calling `tick()` periodically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    schedule: Schedule,
    state: TimerState,
    step_index: usize,
    /// Remaining time in milliseconds for the current step.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) when the timer was last resumed/started.
    /// Used to compute elapsed time between ticks.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl TimerEngine {
    /// Create a new timer engine with the given schedule.
    ///
    /// Starts in the `Idle` state with the first step ready.
    pub fn new(schedule: Schedule) -> Self {
        let remaining_ms = schedule.steps.first().map(|s| s.duration_ms()).unwrap_or(0);
        Self {
            schedule,
            state: TimerState::Idle,
            step_index: 0,
            remaining_ms,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn current_step(&self) -> Option<&super::schedule::Step> {
        self.schedule.steps.get(self.step_index)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn total_ms(&self) -> u64 {
        self.current_step().map(|s| s.duration_ms()).unwrap_or(0)
    }

    /// 0.0 .. 1.0 progress within the current step.
    pub fn step_progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    /// 0.0 .. 100.0 progress across the entire schedule.
    pub fn schedule_progress_pct(&self) -> f64 {
        let total_min = self.schedule.total_duration_min() as f64;
        if total_min == 0.0 {
            return 0.0;
        }
        let completed_min = self.schedule.cumulative_min(self.step_index) as f64;
        let current_step_min = self
            .current_step()
            .map(|s| s.duration_min as f64)
            .unwrap_or(0.0);
        let current_elapsed_min = current_step_min * self.step_progress();
        ((completed_min + current_elapsed_min) / total_min * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let step = self.current_step();
        Event::StateSnapshot {
            state: self.state,
            step_index: self.step_index,
            step_kind: step.map(|s| s.kind).unwrap_or(StepKind::Focus),
            step_label: step.map(|s| s.label.clone()).unwrap_or_default(),
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            schedule_progress_pct: self.schedule_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused | TimerState::Completed => {
                if self.state == TimerState::Completed {
                    // Auto-advance to the next step.
                    self.advance();
                }
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms);
                let step = self.current_step()?;
                Some(Event::TimerStarted {
                    step_index: self.step_index,
                    step_kind: step.kind,
                    duration_secs: step.duration_secs(),
                    at: Utc::now(),
                })
            }
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                // Flush elapsed time first.
                self.flush_elapsed(now_ms);
                self.state = TimerState::Paused;
                self.last_tick_epoch_ms = None;
                Some(Event::TimerPaused {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms);
                Some(Event::TimerResumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn skip(&mut self) -> Option<Event> {
        let from = self.step_index;
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.advance();
        Some(Event::TimerSkipped {
            from_step: from,
            to_step: self.step_index,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.step_index = 0;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self
            .schedule
            .steps
            .first()
            .map(|s| s.duration_ms())
            .unwrap_or(0);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call periodically. Returns `Some(Event::TimerCompleted)` when the
    /// current step finishes.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Deterministic tick against an explicit clock (tests drive this).
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now_ms);
        if self.remaining_ms > 0 {
            return None;
        }
        self.state = TimerState::Completed;
        self.last_tick_epoch_ms = None;
        let step = self.current_step()?;
        Some(Event::TimerCompleted {
            step_index: self.step_index,
            step_kind: step.kind,
            duration_min: step.duration_min,
            at: Utc::now(),
        })
    }

    /// Subtract wall-clock time elapsed since the last tick.
    fn flush_elapsed(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now_ms);
        }
    }

    /// Move to the next step, wrapping to the start of the schedule.
    fn advance(&mut self) {
        self.step_index = (self.step_index + 1) % self.schedule.steps.len().max(1);
        self.remaining_ms = self.total_ms();
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Schedule;

    fn engine() -> TimerEngine {
        TimerEngine::new(Schedule::rounds(25, 5, 2))
    }

    #[test]
    fn new_engine_is_idle_on_first_step() {
        let e = engine();
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.step_index(), 0);
        assert_eq!(e.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn start_tick_complete_cycle() {
        let mut e = engine();
        let started = e.start_at(0);
        assert!(matches!(started, Some(Event::TimerStarted { .. })));
        assert_eq!(e.state(), TimerState::Running);

        // Half way: still running, remaining drops.
        assert!(e.tick_at(12 * 60 * 1000 + 30_000).is_none());
        assert_eq!(e.remaining_ms(), 12 * 60 * 1000 + 30_000);

        // Past the end: the step completes.
        let done = e.tick_at(26 * 60 * 1000);
        match done {
            Some(Event::TimerCompleted {
                step_kind,
                duration_min,
                ..
            }) => {
                assert_eq!(step_kind, StepKind::Focus);
                assert_eq!(duration_min, 25);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(e.state(), TimerState::Completed);

        // Starting again advances to the break step.
        e.start_at(26 * 60 * 1000);
        assert_eq!(e.step_index(), 1);
        assert_eq!(e.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut e = engine();
        e.start_at(0);
        e.tick_at(60_000);
        e.pause_at(120_000);
        assert_eq!(e.state(), TimerState::Paused);
        let frozen = e.remaining_ms();

        // Time passing while paused changes nothing.
        assert!(e.tick_at(600_000).is_none());
        assert_eq!(e.remaining_ms(), frozen);

        e.resume_at(600_000);
        e.tick_at(660_000);
        assert_eq!(e.remaining_ms(), frozen - 60_000);
    }

    #[test]
    fn skip_moves_to_next_step() {
        let mut e = engine();
        e.start_at(0);
        let skipped = e.skip();
        assert!(matches!(
            skipped,
            Some(Event::TimerSkipped {
                from_step: 0,
                to_step: 1,
                ..
            })
        ));
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut e = engine();
        e.start_at(0);
        e.skip();
        e.reset();
        assert_eq!(e.step_index(), 0);
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn engine_serializes_roundtrip() {
        let mut e = engine();
        e.start_at(0);
        e.tick_at(30_000);
        let json = serde_json::to_string(&e).unwrap();
        let decoded: TimerEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.state(), TimerState::Running);
        assert_eq!(decoded.remaining_ms(), e.remaining_ms());
    }
}
