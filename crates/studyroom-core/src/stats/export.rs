//! Per-subject statistics and their CSV export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{sessions_in_timeframe, Timeframe};
use crate::model::{StudySession, Subject};

/// Totals for one subject within a timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStat {
    pub subject: String,
    pub total_minutes: u64,
    pub session_count: usize,
}

/// Per-subject totals over the timeframe, one entry per subject in
/// collection order. Sessions labeled with no known subject are not
/// represented; the export mirrors the subject list, not the session log.
pub fn subject_stats(
    subjects: &[Subject],
    sessions: &[StudySession],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<SubjectStat> {
    let filtered = sessions_in_timeframe(sessions, timeframe, now);
    subjects
        .iter()
        .map(|subject| {
            let matching: Vec<_> = filtered
                .iter()
                .filter(|s| s.subject == subject.name)
                .collect();
            SubjectStat {
                subject: subject.name.clone(),
                total_minutes: matching.iter().map(|s| s.duration_minutes as u64).sum(),
                session_count: matching.len(),
            }
        })
        .collect()
}

/// Render subject stats as CSV: header `Subject,Total Hours,Number of
/// Sessions`, hours to one decimal place.
pub fn subject_stats_csv(
    subjects: &[Subject],
    sessions: &[StudySession],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> String {
    let mut rows = vec!["Subject,Total Hours,Number of Sessions".to_string()];
    for stat in subject_stats(subjects, sessions, timeframe, now) {
        rows.push(format!(
            "{},{:.1},{}",
            stat.subject,
            stat.total_minutes as f64 / 60.0,
            stat.session_count
        ));
    }
    rows.join("\n")
}
