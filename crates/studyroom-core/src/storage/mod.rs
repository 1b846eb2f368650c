//! Key-value persistence gateway.
//!
//! State persists as named JSON payloads through [`Store`], a thin gateway
//! over a raw string [`StorageBackend`]. Reads fall back to caller-supplied
//! defaults and never fail; writes are best-effort and callers log failures
//! without giving up in-memory state. Every successful write publishes a
//! [`StoreChange`] so other views of the same store can refresh.

mod backend;
mod store;

pub use backend::{MemoryBackend, SqliteBackend, StorageBackend};
pub use store::{keys, Store, StoreChange};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/studyroom[-dev]/` based on STUDYROOM_ENV.
///
/// Set STUDYROOM_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyroom-dev")
    } else {
        base_dir.join("studyroom")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
