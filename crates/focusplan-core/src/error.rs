//! Core error types for focusplan-core.
//!
//! Per-task placement failures are not errors: they are reported in
//! [`DailySchedule::unscheduled`](crate::schedule::DailySchedule). [`CoreError`]
//! covers the planning service; [`ConfigError`] is returned by the config store.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Planning did not finish within the caller's deadline
    #[error("Scheduling timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised before a request reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range for {field}: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        field: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Clock time not in HH:MM form
    #[error("Invalid clock time for '{field}': '{value}' (expected HH:MM)")]
    InvalidClockTime { field: String, value: String },

    /// Unparseable timestamp
    #[error("Invalid timestamp for '{field}': '{value}'")]
    InvalidInstant { field: String, value: String },

    /// Unparseable calendar date
    #[error("Invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
