//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::LoggerError;

/// Name used for raw level values outside the defined range.
pub const UNKNOWN_LEVEL_NAME: &str = "UNKNOWN";

/// Ordered message severity. Lower values are more verbose.
///
/// `None` sits below every real severity, so a threshold of `None` lets
/// everything through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Level {
    None = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// All levels, from most verbose to most severe
    pub const ALL: [Level; 6] = [
        Level::None,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Display name for a raw level value.
    ///
    /// Values with no matching level map to [`UNKNOWN_LEVEL_NAME`].
    pub fn name_of(raw: u8) -> &'static str {
        Level::try_from(raw)
            .map(|level| level.as_str())
            .unwrap_or(UNKNOWN_LEVEL_NAME)
    }

    #[inline]
    pub fn more_severe_than(&self, other: Level) -> bool {
        *self > other
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = LoggerError;

    fn try_from(raw: u8) -> Result<Self, LoggerError> {
        Level::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or_else(|| LoggerError::invalid_level(raw.to_string()))
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, LoggerError> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(Level::None),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
