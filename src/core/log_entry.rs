//! Log entry structure and line composition
//!
//! Every line follows the same shape:
//!
//! ```text
//! [LEVEL] [NAME] [TIMESTAMP] [FILE:LINE] MESSAGE
//! ```
//!
//! The name segment is left out for unnamed loggers, the timestamp and call
//! site segments only appear when enabled, and the line always ends with
//! exactly one newline.

use super::callsite::CallSite;
use super::level::Level;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub logger_name: String,
    pub message: String,
    pub timestamp: Option<String>,
    pub call_site: Option<CallSite>,
}

impl LogEntry {
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            timestamp: None,
            call_site: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = Some(call_site);
        self
    }

    /// The bracketed segments in front of the message
    pub fn prefix(&self) -> String {
        let mut prefix = format!("[{}]", self.level);

        if !self.logger_name.is_empty() {
            let _ = write!(prefix, " [{}]", self.logger_name);
        }
        if let Some(ref timestamp) = self.timestamp {
            let _ = write!(prefix, " [{}]", timestamp);
        }
        if let Some(ref site) = self.call_site {
            let _ = write!(prefix, " [{}]", site);
        }

        prefix
    }

    /// Full line as written to sinks, newline-terminated
    pub fn render(&self) -> String {
        let mut line = self.prefix();
        line.reserve(self.message.len() + 2);
        line.push(' ');
        line.push_str(&self.message);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}
