//! # Leveled Logger
//!
//! A leveled logging library: named loggers tag messages with a severity,
//! compose a bracketed line prefix and write the line synchronously to every
//! attached sink.
//!
//! ## Features
//!
//! - **Leveled**: `Debug`, `Info`, `Warning`, `Error` and `Fatal`, filtered per
//!   logger and again per sink
//! - **Multiple Sinks**: any `Write + Send` stream, deduplicated by handle
//! - **Thread Safe**: one write at a time per stream, lines never interleave
//! - **Configurable Prefix**: optional timestamp (local or UTC) and call site
//!
//! ```
//! use leveled_logger::prelude::*;
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! let logger = registry.new_logger("svc", Level::Info);
//! logger.set_include_timestamp(false);
//!
//! let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
//! logger.attach([buffer.clone() as SharedStream]);
//!
//! logger.info("ready");
//! assert_eq!(buffer.lock().as_slice(), b"[INFO] [svc] ready\n");
//! ```

pub mod core;
pub mod macros;
pub mod streams;

pub mod prelude {
    pub use crate::core::{
        shared_stream, CallSite, CallSiteResolver, FatalPolicy, FatalSignal, Level, Logger,
        LoggerBuilder, LoggerDefaults, LoggerError, LoggerSettings, NoopResolver, Registry,
        Result, SharedStream, Sink, TimestampFormat,
    };
}

#[cfg(feature = "backtrace")]
pub use crate::core::BacktraceResolver;
pub use crate::core::{
    default_resolver, global, shared_stream, CallSite, CallSiteResolver, FatalPolicy,
    FatalSignal, Level, LogEntry, Logger, LoggerBuilder, LoggerDefaults, LoggerError,
    LoggerMetrics, LoggerSettings, NoopResolver, Registry, Result, SharedStream, Sink,
    TimestampFormat, DEFAULT_FATAL_EXIT_CODE, DEFAULT_LEVEL, UNKNOWN_LEVEL_NAME,
};
pub use crate::core::registry::{
    add_output, debug, debugf, error, errorf, fatal, fatalf, info, infof, warning, warningf,
};
