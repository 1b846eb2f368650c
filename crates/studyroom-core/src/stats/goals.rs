//! Weekly goal progress per subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{minutes_for_subject, week_bounds};
use crate::model::{StudySession, Subject};

/// Progress against a subject's weekly hour goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Hours studied this week
    pub hours: f64,
    /// Raw percentage of the weekly goal; over-achievement exceeds 100.
    /// Callers clamp for display if they want a bounded bar.
    pub percent: f64,
}

/// Hours logged for the subject in the current week, and the raw percentage
/// of its weekly goal. A zero goal always reports 0 percent.
pub fn weekly_goal_progress(
    subject: &Subject,
    sessions: &[StudySession],
    now: DateTime<Utc>,
) -> GoalProgress {
    let (start, end) = week_bounds(now);
    let minutes = minutes_for_subject(sessions, &subject.name, Some((start, end)));
    let hours = minutes as f64 / 60.0;
    let percent = if subject.goal_hours_per_week > 0.0 {
        hours / subject.goal_hours_per_week * 100.0
    } else {
        0.0
    };
    GoalProgress { hours, percent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubjectDraft;
    use chrono::TimeZone;

    fn subject(name: &str, goal: f64) -> Subject {
        Subject::new(SubjectDraft {
            name: name.into(),
            description: None,
            color: "#6366f1".into(),
            goal_hours_per_week: goal,
        })
    }

    #[test]
    fn reports_hours_and_percent_for_current_week() {
        // Wednesday 2024-01-10; the week is Jan 7 .. Jan 13.
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let sessions = vec![
            StudySession::new("Math", 90, Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()),
            StudySession::new("Math", 30, Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()),
            // Previous week, ignored.
            StudySession::new("Math", 600, Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap()),
        ];
        let progress = weekly_goal_progress(&subject("Math", 4.0), &sessions, now);
        assert!((progress.hours - 2.0).abs() < 1e-9);
        assert!((progress.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_goal_never_divides_by_zero() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let sessions = vec![StudySession::new(
            "Math",
            120,
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        )];
        let progress = weekly_goal_progress(&subject("Math", 0.0), &sessions, now);
        assert_eq!(progress.percent, 0.0);
        assert!((progress.hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn over_achievement_exceeds_one_hundred() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let sessions = vec![StudySession::new(
            "Math",
            180,
            Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap(),
        )];
        let progress = weekly_goal_progress(&subject("Math", 2.0), &sessions, now);
        assert!((progress.percent - 150.0).abs() < 1e-9);
    }
}
