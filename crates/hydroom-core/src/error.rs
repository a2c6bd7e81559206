//! Core error types for hydroom-core.
//!
//! Nothing in the tracker or the scheduler is fatal: every variant here is
//! either recovered locally (an invalid reminder interval) or degraded to a
//! safe default by the controller (unreadable progress falls back to zero).

use std::path::PathBuf;
use thiserror::Error;

use crate::reminder::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};

/// Core error type for hydroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reminder scheduling errors
    #[error("Reminder error: {0}")]
    Reminder(#[from] ReminderError),

    /// Progress persistence errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification layer errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reminder-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// Interval is non-numeric or outside the accepted range.
    #[error(
        "Invalid reminder interval '{raw}': expected whole minutes between {min} and {max}",
        min = MIN_INTERVAL_MINUTES,
        max = MAX_INTERVAL_MINUTES
    )]
    InvalidInterval { raw: String },
}

/// Progress storage errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backing store could not be read
    #[error("Failed to read progress from {location}: {message}")]
    Read { location: String, message: String },

    /// The stored record is not valid JSON for a progress record
    #[error("Failed to parse stored progress: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backing store rejected the write
    #[error("Failed to write progress to {location}: {message}")]
    Write { location: String, message: String },
}

/// Notification-layer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The platform failed while asking for permission
    #[error("Permission request failed: {0}")]
    PermissionRequest(String),
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
