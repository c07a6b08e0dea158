//! Timestamp formatting utilities
//!
//! Renders the timestamp segment of a log line in local time or UTC.
//! Supports RFC 3339, Unix timestamps and custom strftime patterns.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::error::{LoggerError, Result};

const RFC3339_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";
const RFC3339_MILLIS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use leveled_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&at), "2025-01-08T10:30:45+00:00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with seconds and numeric offset: `2025-01-08T10:30:45+02:00`
    ///
    /// This is the default format for new loggers.
    #[default]
    Rfc3339,

    /// RFC 3339 with milliseconds: `2025-01-08T10:30:45.123+02:00`
    Rfc3339Millis,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime pattern
    ///
    /// Prefer [`TimestampFormat::custom`], which rejects patterns chrono
    /// cannot render.
    Custom(String),
}

impl TimestampFormat {
    /// Build a validated custom format
    ///
    /// # Examples
    ///
    /// ```
    /// use leveled_logger::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%Y-%m-%d %H:%M").is_ok());
    /// assert!(TimestampFormat::custom("%Y-%Q").is_err());
    /// ```
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::timestamp_format(pattern));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    /// Format a date-time in its own time zone.
    ///
    /// A custom pattern that chrono cannot render falls back to RFC 3339
    /// instead of panicking.
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Rfc3339 => datetime.format(RFC3339_PATTERN).to_string(),
            TimestampFormat::Rfc3339Millis => datetime.format(RFC3339_MILLIS_PATTERN).to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(RFC3339_PATTERN).to_string(),
                }
            }
        }
    }

    /// Format the current time, in UTC or in the local time zone
    #[must_use]
    pub fn format_now(&self, use_utc: bool) -> String {
        if use_utc {
            self.format(&Utc::now())
        } else {
            self.format(&Local::now())
        }
    }
}
