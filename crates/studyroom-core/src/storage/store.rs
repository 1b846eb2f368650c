//! The persistence gateway: JSON payloads over a raw backend, plus a
//! change-notification feed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::backend::{MemoryBackend, SqliteBackend, StorageBackend};
use crate::error::StorageError;

/// Well-known keys of the persisted state layout.
pub mod keys {
    /// `Vec<Task>`
    pub const TASKS: &str = "tasks";
    /// `Vec<Subject>`
    pub const SUBJECTS: &str = "subjects";
    /// `Vec<StudySession>`
    pub const STUDY_TIME: &str = "studyTime";
    /// `StudyStreak`
    pub const STREAK: &str = "streak";
    /// `StudentProfile`
    pub const PROFILE: &str = "profile";
    /// Persisted `TimerEngine` snapshot
    pub const TIMER: &str = "timer";
}

/// Published on every successful write. Subscribers get at-most-eventual
/// consistency: no ordering guarantee across subscribers, and a slow
/// subscriber may observe lagged notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
}

/// Key-value persistence gateway.
///
/// Reads never fail: a missing key or a malformed payload yields the
/// caller-supplied default. Writes propagate errors; callers treat the store
/// as a best-effort mirror and keep using in-memory state on failure.
pub struct Store {
    backend: Box<dyn StorageBackend>,
    changes: broadcast::Sender<StoreChange>,
}

impl Store {
    /// Wrap an arbitrary backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            backend: Box::new(backend),
            changes,
        }
    }

    /// Open the default on-disk store in the data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(SqliteBackend::open()?))
    }

    /// An ephemeral in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Read a named value, falling back to `default` when the key is absent
    /// or its payload does not parse.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.read(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    debug!(key, error = %e, "stored payload did not parse, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                debug!(key, error = %e, "storage read failed, using default");
                default
            }
        }
    }

    /// Serialize and store a named value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.backend.write(key, &raw)?;
        // Nobody listening is fine.
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Subscribe to write notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StudySession, Subject, SubjectDraft};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn missing_key_yields_default() {
        let store = Store::in_memory();
        let tasks: Vec<StudySession> = store.get(keys::STUDY_TIME, Vec::new()).await;
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = Store::in_memory();
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let sessions = vec![
            StudySession::new("Math", 25, date),
            StudySession::new("History", 50, date),
        ];
        store.set(keys::STUDY_TIME, &sessions).await.unwrap();
        let loaded: Vec<StudySession> = store.get(keys::STUDY_TIME, Vec::new()).await;
        assert_eq!(loaded, sessions);
    }

    #[tokio::test]
    async fn malformed_payload_yields_default() {
        let backend = MemoryBackend::new();
        backend.write(keys::SUBJECTS, "{not json").unwrap();
        let store = Store::new(backend);
        let fallback = vec![Subject::new(SubjectDraft {
            name: "General".into(),
            color: "#6366f1".into(),
            ..Default::default()
        })];
        let loaded: Vec<Subject> = store.get(keys::SUBJECTS, fallback.clone()).await;
        assert_eq!(loaded, fallback);
    }

    #[tokio::test]
    async fn writes_publish_change_notifications() {
        let store = Store::in_memory();
        let mut rx = store.subscribe();
        store.set(keys::TASKS, &Vec::<i32>::new()).await.unwrap();
        let change = rx.recv().await.unwrap();
        assert_eq!(change.key, keys::TASKS);
    }
}
