//! File streams

use crate::core::{LoggerError, Result, SharedStream};
use std::fs::OpenOptions;
use std::path::Path;

/// Open `path` for appending, creating it if needed.
///
/// Writes go straight to the file without an intermediate buffer, so every
/// logged line is on disk once the logging call returns. The file is closed
/// when the last handle to the stream is dropped.
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::{streams, Level, Logger};
///
/// let logger = Logger::new("app", Level::Info);
/// logger.attach([streams::open_file("/var/log/app.log").unwrap()]);
/// ```
pub fn open_file(path: impl AsRef<Path>) -> Result<SharedStream> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation("opening log file", path.display().to_string(), e)
        })?;

    Ok(crate::core::shared_stream(file))
}
