use serde::{Deserialize, Serialize};

/// A subject of study with a weekly hour goal.
///
/// Sessions reference subjects *by name*, not by id. This is deliberate:
/// renaming or deleting a subject never rewrites historical sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique identifier
    pub id: String,
    /// Display name; the value sessions record
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display color token (e.g. "#6366f1")
    pub color: String,
    /// Weekly study goal in hours, `>= 0`
    pub goal_hours_per_week: f64,
}

/// The user-editable fields of a [`Subject`].
#[derive(Debug, Clone, Default)]
pub struct SubjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub goal_hours_per_week: f64,
}

impl Subject {
    /// Create a new subject from a draft.
    pub fn new(draft: SubjectDraft) -> Self {
        Subject {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            color: draft.color,
            goal_hours_per_week: draft.goal_hours_per_week,
        }
    }

    /// Replace all user-editable fields, keeping `id`.
    pub fn apply(&mut self, draft: SubjectDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.color = draft.color;
        self.goal_hours_per_week = draft.goal_hours_per_week;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_serializes_camel_case() {
        let subject = Subject::new(SubjectDraft {
            name: "Mathematics".into(),
            description: None,
            color: "#6366f1".into(),
            goal_hours_per_week: 6.0,
        });

        let json = serde_json::to_string(&subject).unwrap();
        assert!(json.contains("\"goalHoursPerWeek\":6.0"));

        let decoded: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, subject);
    }
}
