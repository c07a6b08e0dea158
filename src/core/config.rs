//! Logger configuration values
//!
//! [`LoggerDefaults`] holds the settings a registry copies into every logger
//! it creates. Later changes to the defaults do not reach loggers that
//! already exist.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Exit code used by [`FatalPolicy::Exit`] when none is configured
pub const DEFAULT_FATAL_EXIT_CODE: i32 = 1;

/// What happens after a fatal message has been delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FatalPolicy {
    /// Unwind with a [`FatalSignal`](crate::FatalSignal) payload.
    ///
    /// Uncaught, this ends the thread (and the process when it is the main
    /// thread); `catch_unwind` can intercept it.
    #[default]
    Panic,

    /// Terminate the process with the given exit code
    Exit(i32),
}

impl FatalPolicy {
    pub fn exit() -> Self {
        FatalPolicy::Exit(DEFAULT_FATAL_EXIT_CODE)
    }
}

/// Settings copied into a logger when it is created
///
/// # Examples
///
/// ```
/// use leveled_logger::LoggerDefaults;
///
/// let defaults = LoggerDefaults::from_json(r#"{"use_utc": true}"#).unwrap();
/// assert!(defaults.use_utc);
/// assert!(defaults.include_timestamp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerDefaults {
    pub timestamp_format: TimestampFormat,
    pub include_timestamp: bool,
    pub show_file_and_line_number: bool,
    pub use_utc: bool,
    pub fatal_policy: FatalPolicy,
}

impl Default for LoggerDefaults {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_timestamp: true,
            show_file_and_line_number: false,
            use_utc: false,
            fatal_policy: FatalPolicy::default(),
        }
    }
}

impl LoggerDefaults {
    /// Parse defaults from a JSON document; missing fields keep their default
    pub fn from_json(json: &str) -> Result<Self> {
        let defaults: LoggerDefaults = serde_json::from_str(json)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Reject custom timestamp patterns chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(ref pattern) = self.timestamp_format {
            TimestampFormat::custom(pattern.as_str())?;
        }
        if let FatalPolicy::Exit(0) = self.fatal_policy {
            return Err(LoggerError::config(
                "LoggerDefaults",
                "fatal exit code must be non-zero",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    #[must_use]
    pub fn with_show_file_and_line_number(mut self, show: bool) -> Self {
        self.show_file_and_line_number = show;
        self
    }

    #[must_use]
    pub fn with_use_utc(mut self, use_utc: bool) -> Self {
        self.use_utc = use_utc;
        self
    }

    #[must_use]
    pub fn with_fatal_policy(mut self, policy: FatalPolicy) -> Self {
        self.fatal_policy = policy;
        self
    }
}
