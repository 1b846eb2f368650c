//! Pomodoro-style focus/break timer.

mod engine;
mod schedule;

pub use engine::{TimerEngine, TimerState};
pub use schedule::{Schedule, Step, StepKind};
