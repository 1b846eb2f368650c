//! Raw string storage underneath the gateway.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;

/// A named-string store. The gateway layers JSON (de)serialization and
/// change notification on top of this.
pub trait StorageBackend: Send + Sync {
    /// Read the raw payload for `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw payload for `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed store: a single `kv` table keyed by name.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open the store at `~/.config/studyroom/studyroom.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("studyroom.db");
        Self::open_at(path)
    }

    /// Open the store at an explicit path (used by tests with temp dirs).
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let conn = Connection::open(&path).map_err(|e| StorageError::OpenFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.migrate(&path)?;
        Ok(backend)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            message: e.to_string(),
        })?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.migrate(&PathBuf::from(":memory:"))?;
        Ok(backend)
    }

    fn migrate(&self, path: &PathBuf) -> Result<(), StorageError> {
        let conn = self.lock("migrate")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| StorageError::OpenFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    fn lock(&self, key: &str) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::ReadFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock(key)?;
        let mut stmt = conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock(key)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::ReadFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::WriteFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
