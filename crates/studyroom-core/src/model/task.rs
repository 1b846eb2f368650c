use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority. Declaration order doubles as urgency order: `High` sorts
/// before `Medium` sorts before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: 0 = high, 1 = medium, 2 = low.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A to-do item.
///
/// `id` is assigned at creation and immutable thereafter. `completed` is
/// toggled independently of edits; an edit replaces every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority (high/medium/low)
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date (calendar day, no time component)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Whether the task is completed
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The user-editable fields of a [`Task`]: everything except `id` and
/// `completed`. Used both when creating and when replacing a task's fields.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new task from a draft. Starts uncompleted.
    pub fn new(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: false,
            created_at: now,
        }
    }

    /// Replace all user-editable fields, keeping `id`, `completed`, and
    /// `created_at`.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
    }

    /// The draft equivalent of this task's current editable fields.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}
