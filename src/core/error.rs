//! Error types for the logger system

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Timestamp pattern chrono cannot render
    #[error("Invalid timestamp pattern '{pattern}'")]
    InvalidTimestampFormat { pattern: String },

    /// Unrecognized level name or raw value
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn timestamp_format(pattern: impl Into<String>) -> Self {
        LoggerError::InvalidTimestampFormat {
            pattern: pattern.into(),
        }
    }

    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(value.into())
    }
}

/// Payload of the unwind raised after a fatal message has been delivered.
///
/// Recover it with [`std::panic::catch_unwind`] and
/// `payload.downcast_ref::<FatalSignal>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalSignal {
    message: String,
}

impl FatalSignal {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The formatted fatal message, without prefix or newline
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FatalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal: {}", self.message)
    }
}

impl std::error::Error for FatalSignal {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("Registry", "empty defaults");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::timestamp_format("%Q");
        assert!(matches!(err, LoggerError::InvalidTimestampFormat { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("LoggerDefaults", "missing field");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerDefaults: missing field"
        );

        let err = LoggerError::invalid_level("LOUD");
        assert_eq!(err.to_string(), "Invalid log level: 'LOUD'");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "/var/log/app.log", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("/var/log/app.log"));
    }

    #[test]
    fn test_fatal_signal() {
        let signal = FatalSignal::new("boom");
        assert_eq!(signal.message(), "boom");
        assert_eq!(signal.to_string(), "fatal: boom");
    }
}
