//! Error types module
//!
//! Two error classes run through the pipeline: validation errors (user
//! caused, expected, returned as typed values; see
//! [`crate::validation::ValidationError`]) and system errors (infrastructure
//! failures that abort the operation). `AppError` unifies both for callers,
//! and `ErrorMetadata` lets each variant self-describe its code, severity,
//! and recoverability.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the
//! `sqlx` feature.

use std::io;

use crate::validation::ValidationError;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error reporting - defines how an error should be presented.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (the operation can be retried)
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata per variant: (error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => ("DATABASE_ERROR", true, LogLevel::Error),
        AppError::Storage(_) => ("STORAGE_ERROR", true, LogLevel::Error),
        AppError::Queue(_) => ("QUEUE_ERROR", false, LogLevel::Error),
        AppError::Validation(v) => (v.error_code(), false, LogLevel::Debug),
        AppError::NotFound(_) => ("NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidInput(_) => ("INVALID_INPUT", false, LogLevel::Debug),
        AppError::Internal(_) => ("INTERNAL_ERROR", false, LogLevel::Error),
        AppError::InternalWithSource { .. } => ("INTERNAL_ERROR", false, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

impl AppError {
    /// The validation failure inside this error, if it is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_their_code() {
        let err: AppError = ValidationError::DataFileCannotBeEmpty.into();
        assert_eq!(err.error_code(), "DATA_FILE_CANNOT_BE_EMPTY");
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert!(!err.is_recoverable());
        assert!(err.as_validation().is_some());
    }

    #[test]
    fn test_queue_errors_are_not_recoverable() {
        // Retrying a publish risks duplicate processing; operators intervene instead.
        let err = AppError::Queue("publish failed".to_string());
        assert_eq!(err.error_code(), "QUEUE_ERROR");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_from_io_error() {
        let err: AppError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        match err {
            AppError::Internal(msg) => assert!(msg.contains("IO error")),
            _ => panic!("Expected Internal variant"),
        }
    }
}
