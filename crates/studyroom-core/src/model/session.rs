use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded block of study time.
///
/// Immutable once recorded; the `subject` field is a free-text label that
/// matches a [`super::Subject`] name by convention, not by enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Unique identifier
    pub id: String,
    /// When the session completed
    pub date: DateTime<Utc>,
    /// Duration in minutes, strictly positive
    pub duration_minutes: u32,
    /// Subject label at the time of recording
    pub subject: String,
}

impl StudySession {
    /// Record a new session.
    pub fn new(subject: impl Into<String>, duration_minutes: u32, date: DateTime<Utc>) -> Self {
        StudySession {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            duration_minutes,
            subject: subject.into(),
        }
    }
}
