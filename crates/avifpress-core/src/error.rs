//! Error types module
//!
//! All failures in the conversion pipeline are unified under the `AppError`
//! enum: request validation, missing sources, codec failures, filesystem
//! trouble, and encode deadlines. The HTTP layer decides how much of this the
//! client gets to see; the variants here only carry the internal detail.

use std::io;

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

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl AppError {
    /// Stable kind string for log records and operational tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Codec(_) => "codec",
            AppError::Filesystem(_) => "filesystem",
            AppError::Timeout(_) => "timeout",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) => LogLevel::Debug,
            AppError::NotFound(_) => LogLevel::Warn,
            AppError::Codec(_) => LogLevel::Error,
            AppError::Filesystem(_) => LogLevel::Error,
            AppError::Timeout(_) => LogLevel::Warn,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Filesystem(err.to_string())
    }
}
