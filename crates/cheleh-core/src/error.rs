//! Core error types for cheleh-core.
//!
//! This module defines the error hierarchy using thiserror. Engine
//! rejections (`ProgressionError`) are ordinary, expected outcomes: the
//! caller keeps its previous `Habit` value and reports the reason.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cheleh-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A progression transition was rejected
    #[error("Rejected: {0}")]
    Progression(#[from] ProgressionError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No habit with the given id exists in the book
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons the progression engine refuses a transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// Stage index does not exist on this habit
    #[error("Stage {index} out of range (habit has {len} stages)")]
    StageOutOfRange { index: usize, len: usize },

    /// Day index is outside 0..40
    #[error("Day {index} out of range (stages have {len} days)")]
    DayOutOfRange { index: usize, len: usize },

    /// Target slot lies outside the editability window
    #[error(
        "Day at global index {global_index} is not editable (current day {current_day}, last filled {last_filled:?})"
    )]
    NotEditable {
        global_index: usize,
        current_day: usize,
        last_filled: Option<usize>,
    },

    /// Last stage must be fully marked before a new one is appended
    #[error("Stage {stage_index} is not complete ({filled}/40 days marked)")]
    StageIncomplete { stage_index: usize, filled: usize },

    /// Descriptor validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
