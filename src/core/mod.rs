//! Core logger types and traits

pub mod callsite;
pub mod config;
pub mod error;
pub mod level;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod sink;
pub mod timestamp;

#[cfg(feature = "backtrace")]
pub use callsite::BacktraceResolver;
pub use callsite::{default_resolver, CallSite, CallSiteResolver, NoopResolver};
pub use config::{FatalPolicy, LoggerDefaults, DEFAULT_FATAL_EXIT_CODE};
pub use error::{FatalSignal, LoggerError, Result};
pub use level::{Level, UNKNOWN_LEVEL_NAME};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerBuilder, LoggerSettings};
pub use metrics::LoggerMetrics;
pub use registry::{global, Registry, DEFAULT_LEVEL};
pub use sink::{shared_stream, SharedStream, Sink};
pub use timestamp::TimestampFormat;
