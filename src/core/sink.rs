//! Level-filtered output sinks

use super::level::Level;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Handle to an output stream shared between the caller and any sinks.
///
/// The mutex is the write guard: at most one write is in flight per stream,
/// so concurrent lines never interleave. The library never closes the
/// stream; it goes away when the last handle is dropped.
pub type SharedStream = Arc<Mutex<dyn Write + Send>>;

/// Wrap a writer into a [`SharedStream`]
///
/// # Examples
///
/// ```
/// use leveled_logger::shared_stream;
///
/// let stream = shared_stream(Vec::<u8>::new());
/// ```
pub fn shared_stream<W: Write + Send + 'static>(writer: W) -> SharedStream {
    Arc::new(Mutex::new(writer))
}

/// Identity comparison of two stream handles, ignoring their contents
pub(crate) fn same_stream(a: &SharedStream, b: &SharedStream) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// A level-filtered adapter around one output stream.
///
/// `write` takes the message verbatim; line formatting is the logger's job.
pub struct Sink {
    level: AtomicU8,
    stream: SharedStream,
}

impl Sink {
    pub fn new(level: Level, stream: SharedStream) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            stream,
        }
    }

    /// Sink on standard output that only lets warnings and above through
    pub fn stdout() -> Self {
        Self::new(Level::Warning, crate::streams::stdout())
    }

    pub fn level(&self) -> Level {
        // Only valid levels are ever stored
        Level::try_from(self.level.load(Ordering::Relaxed)).unwrap_or(Level::None)
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn stream(&self) -> &SharedStream {
        &self.stream
    }

    /// Whether this sink writes to exactly this stream handle
    pub fn same_stream(&self, stream: &SharedStream) -> bool {
        same_stream(&self.stream, stream)
    }

    /// Write `message` unless `level` is below the sink threshold.
    ///
    /// Errors from the stream are returned as-is.
    pub fn write(&self, level: Level, message: &str) -> io::Result<()> {
        if level < self.level() {
            return Ok(());
        }

        let mut stream = self.stream.lock();
        stream.write_all(message.as_bytes())
    }

    /// Flush the underlying stream. Logging never does this implicitly.
    pub fn flush(&self) -> io::Result<()> {
        self.stream.lock().flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("level", &self.level())
            .field("stream", &Arc::as_ptr(&self.stream))
            .finish()
    }
}
