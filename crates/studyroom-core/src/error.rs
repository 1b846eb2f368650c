//! Core error types for studyroom-core.
//!
//! This module defines the error hierarchy using thiserror. There are no
//! fatal errors in the core: storage reads recover through caller-supplied
//! defaults, storage writes are logged and swallowed by the app container,
//! and validation failures are rejected before any state mutates.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup for an entity that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Read from the backing store failed
    #[error("Storage read failed for '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Write to the backing store failed
    #[error("Storage write failed for '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// The data directory could not be resolved or created
    #[error("Could not resolve data directory: {0}")]
    DataDir(String),
}

/// Validation errors. Raised before any mutation takes place.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    EmptyField(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
