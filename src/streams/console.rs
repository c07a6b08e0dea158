//! Standard output and standard error streams

use crate::core::SharedStream;
use once_cell::sync::Lazy;
use std::sync::Arc;

static STDOUT: Lazy<SharedStream> = Lazy::new(|| crate::core::shared_stream(std::io::stdout()));
static STDERR: Lazy<SharedStream> = Lazy::new(|| crate::core::shared_stream(std::io::stderr()));

/// Shared handle to standard output.
///
/// Every call returns the same handle, so attaching it twice is a no-op.
pub fn stdout() -> SharedStream {
    Arc::clone(&STDOUT)
}

/// Shared handle to standard error
pub fn stderr() -> SharedStream {
    Arc::clone(&STDERR)
}
