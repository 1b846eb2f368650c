//! Derived metrics over entity snapshots.
//!
//! Everything here is pure: aggregates are recomputed from the collections on
//! read, and every range-bounded query takes the reference instant as a
//! parameter so tests never depend on the system clock.

mod aggregate;
mod export;
mod goals;
mod tasks;

pub use aggregate::{
    daily_average, daily_totals, minutes_for_subject, minutes_in_range, month_bounds,
    sessions_in_timeframe, subject_distribution, subject_share, timeframe_bounds, total_minutes,
    week_bounds, DailyTotal, SubjectMinutes, SubjectShare, Timeframe,
};
pub use export::{subject_stats, subject_stats_csv, SubjectStat};
pub use goals::{weekly_goal_progress, GoalProgress};
pub use tasks::{completion_rate, filter_tasks, sort_tasks, TaskFilter, TaskSort};
