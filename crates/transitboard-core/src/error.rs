//! Core error types for transitboard-core.
//!
//! This module defines the error hierarchy using thiserror. Most of these
//! never reach the user as failures: the dashboard recovers from source,
//! preference and location errors and reports them through the notifier.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for transitboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Alert source errors
    #[error("Alert source error: {0}")]
    Source(#[from] SourceError),

    /// Location provider errors
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not determine or create the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors raised by an alert source while fetching a fresh alert list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The feed could not be reached
    #[error("alert feed unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a location provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The platform has no location support at all
    #[error("location not supported on this platform")]
    Unsupported,

    /// A fix was requested but could not be obtained
    #[error("could not get location: {0}")]
    Unavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Value outside its permitted range
    #[error("Value {value} for '{field}' is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_wraps_into_core_error() {
        let err: CoreError = SourceError::Unavailable("timeout".into()).into();
        assert_eq!(err.to_string(), "Alert source error: alert feed unavailable: timeout");
    }

    #[test]
    fn out_of_range_message_names_field() {
        let err = ValidationError::OutOfRange {
            field: "service_reliability".into(),
            value: 140.0,
            min: 0.0,
            max: 100.0,
        };
        assert!(err.to_string().contains("service_reliability"));
    }
}
