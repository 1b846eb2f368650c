//! Application-state container.
//!
//! [`App`] is the single owner of the entity collections. All mutations run
//! synchronously in response to user intents; every mutation re-persists its
//! collection through the gateway. Persistence is a best-effort mirror: a
//! failed write is logged and the in-memory state stays authoritative, so
//! nothing here is fatal. Validation happens before any mutation, so a
//! rejected intent leaves no partial state behind.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::error::{CoreError, Result, ValidationError};
use crate::model::{
    Achievement, StudentProfile, StudySession, Subject, SubjectDraft, Task, TaskDraft,
};
use crate::storage::{keys, Store};
use crate::streak::StudyStreak;

/// In-memory application state plus its persistence gateway.
pub struct App {
    store: Store,
    tasks: Vec<Task>,
    subjects: Vec<Subject>,
    sessions: Vec<StudySession>,
    streak: StudyStreak,
    profile: StudentProfile,
}

impl App {
    /// Load all collections from the store, substituting defaults for
    /// anything missing or malformed. Never fails.
    pub async fn load(store: Store, now: DateTime<Utc>) -> Self {
        let tasks = store.get(keys::TASKS, Vec::new()).await;
        let subjects = store.get(keys::SUBJECTS, Vec::new()).await;
        let sessions = store.get(keys::STUDY_TIME, Vec::new()).await;
        let streak = store.get(keys::STREAK, StudyStreak::new(now)).await;
        let profile = store.get(keys::PROFILE, StudentProfile::default()).await;
        App {
            store,
            tasks,
            subjects,
            sessions,
            streak,
            profile,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn streak(&self) -> &StudyStreak {
        &self.streak
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ── Task intents ─────────────────────────────────────────────────

    /// Create a task from a draft. Rejects an empty title.
    pub async fn create_task(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<Task> {
        validate_title(&draft.title)?;
        let task = Task::new(draft, now);
        self.tasks.push(task.clone());
        self.persist(keys::TASKS, &self.tasks).await;
        Ok(task)
    }

    /// Replace a task's editable fields (everything except `id` and
    /// `completed`).
    pub async fn update_task(&mut self, id: &str, draft: TaskDraft) -> Result<Task> {
        validate_title(&draft.title)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Task",
                id: id.to_string(),
            })?;
        task.apply(draft);
        let updated = task.clone();
        self.persist(keys::TASKS, &self.tasks).await;
        Ok(updated)
    }

    /// Flip a task's completion flag.
    pub async fn toggle_task(&mut self, id: &str) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Task",
                id: id.to_string(),
            })?;
        task.completed = !task.completed;
        let updated = task.clone();
        self.persist(keys::TASKS, &self.tasks).await;
        Ok(updated)
    }

    /// Delete a task by id.
    pub async fn delete_task(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(CoreError::NotFound {
                entity: "Task",
                id: id.to_string(),
            });
        }
        self.persist(keys::TASKS, &self.tasks).await;
        Ok(())
    }

    /// Remove all completed tasks, returning how many were cleared.
    pub async fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let cleared = before - self.tasks.len();
        if cleared > 0 {
            self.persist(keys::TASKS, &self.tasks).await;
        }
        cleared
    }

    // ── Subject intents ──────────────────────────────────────────────

    /// Create a subject. Rejects an empty name or a negative weekly goal.
    pub async fn create_subject(&mut self, draft: SubjectDraft) -> Result<Subject> {
        validate_subject(&draft)?;
        let subject = Subject::new(draft);
        self.subjects.push(subject.clone());
        self.persist(keys::SUBJECTS, &self.subjects).await;
        Ok(subject)
    }

    /// Replace a subject's editable fields. Historical sessions keep the old
    /// name; the reference is by name and deliberately loose.
    pub async fn update_subject(&mut self, id: &str, draft: SubjectDraft) -> Result<Subject> {
        validate_subject(&draft)?;
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Subject",
                id: id.to_string(),
            })?;
        subject.apply(draft);
        let updated = subject.clone();
        self.persist(keys::SUBJECTS, &self.subjects).await;
        Ok(updated)
    }

    /// Delete a subject. Does not cascade: sessions recorded under its name
    /// are left untouched.
    pub async fn delete_subject(&mut self, id: &str) -> Result<()> {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        if self.subjects.len() == before {
            return Err(CoreError::NotFound {
                entity: "Subject",
                id: id.to_string(),
            });
        }
        self.persist(keys::SUBJECTS, &self.subjects).await;
        Ok(())
    }

    // ── Session + streak intents ─────────────────────────────────────

    /// Record a completed study session and advance the streak.
    ///
    /// A missing or blank subject records as "General". Zero-minute sessions
    /// are rejected before anything mutates.
    pub async fn record_session(
        &mut self,
        subject: Option<String>,
        minutes: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<StudySession> {
        if minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "durationMinutes",
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "General".to_string());

        let session = StudySession::new(subject, minutes, completed_at);
        self.sessions.push(session.clone());
        self.streak = self.streak.advance(completed_at);

        self.persist(keys::STUDY_TIME, &self.sessions).await;
        self.persist(keys::STREAK, &self.streak).await;
        Ok(session)
    }

    /// Bulk-clear the session log, returning how many were removed. Sessions
    /// are immutable individually; this is the only way they go away. The
    /// streak is left as-is.
    pub async fn clear_sessions(&mut self) -> usize {
        let cleared = self.sessions.len();
        if cleared > 0 {
            self.sessions.clear();
            self.persist(keys::STUDY_TIME, &self.sessions).await;
        }
        cleared
    }

    // ── Profile intents ──────────────────────────────────────────────

    /// Replace the profile wholesale.
    pub async fn save_profile(&mut self, profile: StudentProfile) {
        self.profile = profile;
        self.persist(keys::PROFILE, &self.profile).await;
    }

    /// Append an achievement to the profile log.
    pub async fn add_achievement(&mut self, achievement: Achievement) {
        self.profile.achievements.push(achievement);
        self.persist(keys::PROFILE, &self.profile).await;
    }

    // ── Persistence ──────────────────────────────────────────────────

    async fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.store.set(key, value).await {
            warn!(key, error = %e, "persist failed; in-memory state remains authoritative");
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyField("title").into());
    }
    Ok(())
}

fn validate_subject(draft: &SubjectDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyField("name").into());
    }
    if !draft.goal_hours_per_week.is_finite() || draft.goal_hours_per_week < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "goalHoursPerWeek",
            message: "must be zero or a positive number".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 10, 0, 0).unwrap()
    }

    async fn app() -> App {
        App::load(Store::in_memory(), at(1)).await
    }

    #[tokio::test]
    async fn create_task_rejects_blank_title() {
        let mut app = app().await;
        let err = app
            .create_task(
                TaskDraft {
                    title: "   ".into(),
                    ..Default::default()
                },
                at(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyField("title"))
        ));
        assert!(app.tasks().is_empty());
    }

    #[tokio::test]
    async fn toggle_flips_completion() {
        let mut app = app().await;
        let task = app
            .create_task(
                TaskDraft {
                    title: "Revise notes".into(),
                    ..Default::default()
                },
                at(1),
            )
            .await
            .unwrap();
        assert!(!task.completed);
        let toggled = app.toggle_task(&task.id).await.unwrap();
        assert!(toggled.completed);
        let toggled = app.toggle_task(&task.id).await.unwrap();
        assert!(!toggled.completed);
    }

    #[tokio::test]
    async fn record_session_rejects_zero_minutes() {
        let mut app = app().await;
        let err = app.record_session(None, 0, at(2)).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(app.sessions().is_empty());
        assert_eq!(app.streak().current_streak, 0);
    }

    #[tokio::test]
    async fn record_session_defaults_subject_and_advances_streak() {
        let mut app = app().await;
        let session = app.record_session(None, 25, at(2)).await.unwrap();
        assert_eq!(session.subject, "General");
        assert_eq!(app.streak().current_streak, 1);

        app.record_session(Some("Math".into()), 25, at(3))
            .await
            .unwrap();
        assert_eq!(app.streak().current_streak, 2);
        assert_eq!(app.streak().best_streak, 2);
    }

    #[tokio::test]
    async fn deleting_subject_keeps_sessions() {
        let mut app = app().await;
        let subject = app
            .create_subject(SubjectDraft {
                name: "Chemistry".into(),
                color: "#10b981".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        app.record_session(Some("Chemistry".into()), 30, at(2))
            .await
            .unwrap();

        app.delete_subject(&subject.id).await.unwrap();
        assert!(app.subjects().is_empty());
        assert_eq!(app.sessions()[0].subject, "Chemistry");
    }

    // Minimal clonable backend so two App instances can share storage.
    #[derive(Default, Clone)]
    struct SharedBackend {
        inner: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
    }

    impl crate::storage::StorageBackend for SharedBackend {
        fn read(&self, key: &str) -> Result<Option<String>, crate::error::StorageError> {
            Ok(self.inner.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), crate::error::StorageError> {
            self.inner
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn reload_restores_collections() {
        let backend = SharedBackend::default();
        let mut app = App::load(Store::new(backend.clone()), at(1)).await;
        app.create_task(
            TaskDraft {
                title: "Flashcards".into(),
                ..Default::default()
            },
            at(1),
        )
        .await
        .unwrap();
        app.record_session(Some("Math".into()), 45, at(2))
            .await
            .unwrap();

        let reloaded = App::load(Store::new(backend), at(3)).await;
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0].title, "Flashcards");
        assert_eq!(reloaded.sessions().len(), 1);
        assert_eq!(reloaded.streak().current_streak, 1);
    }
}
