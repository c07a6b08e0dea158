//! Named logger implementation

use super::{
    callsite::{default_resolver, CallSite, CallSiteResolver},
    config::{FatalPolicy, LoggerDefaults},
    error::{FatalSignal, Result},
    level::Level,
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    sink::{same_stream, SharedStream, Sink},
    timestamp::TimestampFormat,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Per-logger formatting and filtering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    pub min_level: Level,
    pub timestamp_format: TimestampFormat,
    pub include_timestamp: bool,
    pub show_file_and_line_number: bool,
    pub use_utc: bool,
    pub fatal_policy: FatalPolicy,
}

impl LoggerSettings {
    pub fn from_defaults(min_level: Level, defaults: &LoggerDefaults) -> Self {
        Self {
            min_level,
            timestamp_format: defaults.timestamp_format.clone(),
            include_timestamp: defaults.include_timestamp,
            show_file_and_line_number: defaults.show_file_and_line_number,
            use_utc: defaults.use_utc,
            fatal_policy: defaults.fatal_policy,
        }
    }
}

/// A named logger writing to an ordered set of sinks.
///
/// Logging is synchronous: every call formats the line on the calling thread
/// and writes it to each sink in attachment order before returning.
pub struct Logger {
    name: String,
    settings: RwLock<LoggerSettings>,
    sinks: RwLock<Vec<Arc<Sink>>>,
    resolver: Arc<dyn CallSiteResolver>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create an unregistered logger with the library defaults
    #[must_use]
    pub fn new(name: impl Into<String>, min_level: Level) -> Self {
        Self::builder(name).min_level(min_level).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> LoggerSettings {
        self.settings.read().clone()
    }

    /// Change several settings under one lock
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{Level, Logger};
    ///
    /// let logger = Logger::new("svc", Level::Info);
    /// logger.configure(|s| {
    ///     s.include_timestamp = false;
    ///     s.min_level = Level::Debug;
    /// });
    /// assert_eq!(logger.min_level(), Level::Debug);
    /// ```
    pub fn configure(&self, update: impl FnOnce(&mut LoggerSettings)) {
        update(&mut self.settings.write());
    }

    pub fn min_level(&self) -> Level {
        self.settings.read().min_level
    }

    pub fn set_min_level(&self, level: Level) {
        self.settings.write().min_level = level;
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.settings.write().timestamp_format = format;
    }

    pub fn set_include_timestamp(&self, include: bool) {
        self.settings.write().include_timestamp = include;
    }

    pub fn set_show_file_and_line_number(&self, show: bool) {
        self.settings.write().show_file_and_line_number = show;
    }

    pub fn set_use_utc(&self, use_utc: bool) {
        self.settings.write().use_utc = use_utc;
    }

    pub fn set_fatal_policy(&self, policy: FatalPolicy) {
        self.settings.write().fatal_policy = policy;
    }

    /// Attach output streams, each behind a pass-through sink.
    ///
    /// Streams that are already attached (same handle, not same contents)
    /// are skipped; the rest are appended in the order given.
    pub fn attach<I>(&self, streams: I)
    where
        I: IntoIterator<Item = SharedStream>,
    {
        let mut sinks = self.sinks.write();
        for stream in streams {
            if !sinks.iter().any(|sink| sink.same_stream(&stream)) {
                sinks.push(Arc::new(Sink::new(Level::None, stream)));
            }
        }
    }

    /// Attach a pre-built sink with its own threshold.
    ///
    /// Returns `false` if a sink for the same stream is already attached.
    pub fn attach_sink(&self, sink: Arc<Sink>) -> bool {
        let mut sinks = self.sinks.write();
        if sinks
            .iter()
            .any(|attached| same_stream(attached.stream(), sink.stream()))
        {
            return false;
        }
        sinks.push(sink);
        true
    }

    pub fn sinks(&self) -> Vec<Arc<Sink>> {
        self.sinks.read().clone()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Flush every attached stream, returning the first failure.
    ///
    /// Logging calls never flush on their own.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks() {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether a message at `level` would pass this logger's filter
    pub fn enabled(&self, level: Level) -> bool {
        level == Level::Fatal || level >= self.min_level()
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.write(Level::Debug, message.as_ref(), 0);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.write_args(Level::Debug, args, 0);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write(Level::Info, message.as_ref(), 0);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.write_args(Level::Info, args, 0);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.write(Level::Warning, message.as_ref(), 0);
    }

    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.write_args(Level::Warning, args, 0);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write(Level::Error, message.as_ref(), 0);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.write_args(Level::Error, args, 0);
    }

    /// Deliver `message` at `Fatal` level, then terminate per the fatal policy.
    ///
    /// Fatal messages ignore the logger's minimum level. The line is written
    /// to every sink before the unwind or exit starts.
    pub fn fatal(&self, message: impl AsRef<str>) -> ! {
        let message = message.as_ref();
        self.write(Level::Fatal, message, 0);
        self.terminate(message.to_owned())
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.write(Level::Fatal, &message, 0);
        self.terminate(message)
    }

    /// Log at an arbitrary level. Never terminates, even for `Fatal`.
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        self.write(level, message.as_ref(), 0);
    }

    pub fn log_args(&self, level: Level, args: fmt::Arguments<'_>) {
        self.write_args(level, args, 0);
    }

    /// Log with an explicit call depth for the file/line segment.
    ///
    /// Depth 0 reports the code that called into the library; a helper that
    /// wraps the logger passes 1 to report its own caller instead.
    pub fn log_with_depth(&self, level: Level, message: impl AsRef<str>, call_depth: usize) {
        self.write(level, message.as_ref(), call_depth);
    }

    pub(crate) fn write_args(&self, level: Level, args: fmt::Arguments<'_>, call_depth: usize) {
        if !self.passes(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.dispatch(level, message, call_depth),
            None => self.dispatch(level, &args.to_string(), call_depth),
        }
    }

    pub(crate) fn write(&self, level: Level, message: &str, call_depth: usize) {
        if self.passes(level) {
            self.dispatch(level, message, call_depth);
        }
    }

    pub(crate) fn terminate(&self, message: String) -> ! {
        let policy = self.settings.read().fatal_policy;
        match policy {
            FatalPolicy::Panic => std::panic::panic_any(FatalSignal::new(message)),
            FatalPolicy::Exit(code) => std::process::exit(code),
        }
    }

    fn passes(&self, level: Level) -> bool {
        if self.enabled(level) {
            true
        } else {
            self.metrics.record_filtered();
            false
        }
    }

    fn compose(&self, level: Level, message: &str, call_depth: usize) -> String {
        let mut entry = LogEntry::new(level, self.name.as_str(), message);

        let show_call_site = {
            let settings = self.settings.read();
            if settings.include_timestamp {
                entry = entry.with_timestamp(settings.timestamp_format.format_now(settings.use_utc));
            }
            settings.show_file_and_line_number
        };

        if show_call_site {
            let site = self
                .resolver
                .resolve(call_depth)
                .unwrap_or_else(CallSite::unknown);
            entry = entry.with_call_site(site);
        }

        entry.render()
    }

    fn dispatch(&self, level: Level, message: &str, call_depth: usize) {
        let line = self.compose(level, message, call_depth);

        // Snapshot so a slow stream never holds up attach()
        let sinks = self.sinks();
        for sink in &sinks {
            if sink.write(level, &line).is_err() {
                self.metrics.record_sink_error();
            }
        }
        self.metrics.record_written();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("settings", &*self.settings.read())
            .field("sinks", &self.sink_count())
            .finish()
    }
}

/// Builder for standalone `Logger` instances
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let buffer = shared_stream(Vec::<u8>::new());
/// let logger = Logger::builder("worker")
///     .min_level(Level::Debug)
///     .include_timestamp(false)
///     .stream(buffer)
///     .build();
/// assert_eq!(logger.sink_count(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: Level,
    defaults: LoggerDefaults,
    resolver: Option<Arc<dyn CallSiteResolver>>,
    sinks: Vec<Arc<Sink>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: Level::Info,
            defaults: LoggerDefaults::default(),
            resolver: None,
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Start from a full set of defaults, e.g. a registry's
    #[must_use = "builder methods return a new value"]
    pub fn defaults(mut self, defaults: LoggerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.defaults.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn include_timestamp(mut self, include: bool) -> Self {
        self.defaults.include_timestamp = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_file_and_line_number(mut self, show: bool) -> Self {
        self.defaults.show_file_and_line_number = show;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_utc(mut self, use_utc: bool) -> Self {
        self.defaults.use_utc = use_utc;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_policy(mut self, policy: FatalPolicy) -> Self {
        self.defaults.fatal_policy = policy;
        self
    }

    /// Replace the call-site resolver
    #[must_use = "builder methods return a new value"]
    pub fn resolver(mut self, resolver: Arc<dyn CallSiteResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Add a stream behind a pass-through sink
    #[must_use = "builder methods return a new value"]
    pub fn stream(self, stream: SharedStream) -> Self {
        self.sink(Sink::new(Level::None, stream))
    }

    pub fn build(self) -> Logger {
        let logger = Logger {
            name: self.name,
            settings: RwLock::new(LoggerSettings::from_defaults(self.min_level, &self.defaults)),
            sinks: RwLock::new(Vec::new()),
            resolver: self.resolver.unwrap_or_else(default_resolver),
            metrics: LoggerMetrics::new(),
        };

        for sink in self.sinks {
            logger.attach_sink(sink);
        }

        logger
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::callsite::NoopResolver;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    type Buffer = Arc<Mutex<Vec<u8>>>;

    fn buffer() -> (Buffer, SharedStream) {
        let buf: Buffer = Arc::new(Mutex::new(Vec::new()));
        let stream: SharedStream = buf.clone();
        (buf, stream)
    }

    fn contents(buf: &Buffer) -> String {
        String::from_utf8(buf.lock().clone()).expect("utf-8 log output")
    }

    fn plain_logger(name: &str, level: Level) -> (Logger, Buffer) {
        let (buf, stream) = buffer();
        let logger = Logger::builder(name)
            .min_level(level)
            .include_timestamp(false)
            .show_file_and_line_number(false)
            .build();
        logger.attach([stream]);
        (logger, buf)
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "simulated failure"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "simulated failure"))
        }
    }

    #[test]
    fn test_info_line_format() {
        let (logger, buf) = plain_logger("svc", Level::Info);
        logger.info("ready");
        assert_eq!(contents(&buf), "[INFO] [svc] ready\n");
    }

    #[test]
    fn test_below_min_level_is_dropped() {
        let (logger, buf) = plain_logger("svc", Level::Warning);
        logger.debug("x");
        logger.info("y");
        assert!(contents(&buf).is_empty());
        assert_eq!(logger.metrics().lines_filtered(), 2);
        assert_eq!(logger.metrics().lines_written(), 0);
    }

    #[test]
    fn test_each_level_tag() {
        let (logger, buf) = plain_logger("svc", Level::Debug);
        logger.debug("a");
        logger.info("b");
        logger.warning("c");
        logger.error("d");
        assert_eq!(
            contents(&buf),
            "[DEBUG] [svc] a\n[INFO] [svc] b\n[WARNING] [svc] c\n[ERROR] [svc] d\n"
        );
    }

    #[test]
    fn test_formatted_variants() {
        let (logger, buf) = plain_logger("svc", Level::Debug);
        logger.debugf(format_args!("{} items", 3));
        logger.infof(format_args!("listening on {}:{}", "0.0.0.0", 8080));
        logger.warningf(format_args!("retry {} of {}", 1, 5));
        logger.errorf(format_args!("code {}", 500));
        assert_eq!(
            contents(&buf),
            "[DEBUG] [svc] 3 items\n\
             [INFO] [svc] listening on 0.0.0.0:8080\n\
             [WARNING] [svc] retry 1 of 5\n\
             [ERROR] [svc] code 500\n"
        );
    }

    #[test]
    fn test_filtered_formatted_message_is_not_formatted() {
        struct Exploding;

        impl fmt::Display for Exploding {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a filtered message");
            }
        }

        let (logger, buf) = plain_logger("svc", Level::Error);
        logger.debugf(format_args!("{}", Exploding));
        assert!(contents(&buf).is_empty());
    }

    #[test]
    fn test_trailing_newline_not_doubled() {
        let (logger, buf) = plain_logger("svc", Level::Info);
        logger.info("done\n");
        logger.info("again");
        assert_eq!(contents(&buf), "[INFO] [svc] done\n[INFO] [svc] again\n");
    }

    #[test]
    fn test_fatal_writes_then_unwinds() {
        let (logger, buf) = plain_logger("svc", Level::Info);

        let result = catch_unwind(AssertUnwindSafe(|| logger.fatal("boom")));

        let payload = result.expect_err("fatal must not return");
        let signal = payload
            .downcast_ref::<FatalSignal>()
            .expect("payload is a FatalSignal");
        assert_eq!(signal.message(), "boom");
        assert_eq!(contents(&buf), "[FATAL] [svc] boom\n");
    }

    #[test]
    fn test_fatalf_carries_formatted_message() {
        let (logger, buf) = plain_logger("svc", Level::Fatal);

        let result = catch_unwind(AssertUnwindSafe(|| {
            logger.fatalf(format_args!("disk {} full", "/dev/sda1"))
        }));

        let payload = result.expect_err("fatalf must not return");
        let signal = payload
            .downcast_ref::<FatalSignal>()
            .expect("payload is a FatalSignal");
        assert_eq!(signal.message(), "disk /dev/sda1 full");
        assert_eq!(contents(&buf), "[FATAL] [svc] disk /dev/sda1 full\n");
    }

    #[test]
    fn test_log_fatal_level_does_not_terminate() {
        let (logger, buf) = plain_logger("svc", Level::Info);
        logger.log(Level::Fatal, "still here");
        assert_eq!(contents(&buf), "[FATAL] [svc] still here\n");
    }

    #[test]
    fn test_attach_same_stream_twice() {
        let (logger, _buf) = plain_logger("svc", Level::Info);
        let (_other, stream) = buffer();

        logger.attach([stream.clone()]);
        logger.attach([stream.clone()]);
        logger.attach([stream]);

        assert_eq!(logger.sink_count(), 2);
    }

    #[test]
    fn test_attach_batch_keeps_order_and_skips_known() {
        let logger = Logger::builder("svc").include_timestamp(false).build();
        let (buf1, s1) = buffer();
        let (buf2, s2) = buffer();
        let (_buf3, s3) = buffer();

        logger.attach([s1.clone()]);
        logger.attach([s2.clone(), s1.clone(), s3.clone(), s2.clone()]);

        let sinks = logger.sinks();
        assert_eq!(sinks.len(), 3);
        assert!(sinks[0].same_stream(&s1));
        assert!(sinks[1].same_stream(&s2));
        assert!(sinks[2].same_stream(&s3));

        logger.info("fan out");
        assert_eq!(contents(&buf1), "[INFO] [svc] fan out\n");
        assert_eq!(contents(&buf2), "[INFO] [svc] fan out\n");
    }

    #[test]
    fn test_attach_sink_rejects_known_stream() {
        let (logger, _buf) = plain_logger("svc", Level::Info);
        let (_other, stream) = buffer();

        assert!(logger.attach_sink(Arc::new(Sink::new(Level::Error, stream.clone()))));
        assert!(!logger.attach_sink(Arc::new(Sink::new(Level::Debug, stream))));
        assert_eq!(logger.sink_count(), 2);
    }

    #[test]
    fn test_sink_threshold_filters_independently() {
        let (logger, all) = plain_logger("svc", Level::Debug);
        let (errors_only, stream) = buffer();
        logger.attach_sink(Arc::new(Sink::new(Level::Error, stream)));

        logger.info("routine");
        logger.error("broken");

        assert_eq!(contents(&all), "[INFO] [svc] routine\n[ERROR] [svc] broken\n");
        assert_eq!(contents(&errors_only), "[ERROR] [svc] broken\n");
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let logger = Logger::builder("svc").include_timestamp(false).build();
        let (buf, stream) = buffer();
        logger.attach([shared_failing(), stream]);

        logger.info("still delivered");

        assert_eq!(contents(&buf), "[INFO] [svc] still delivered\n");
        assert_eq!(logger.metrics().sink_errors(), 1);
        assert_eq!(logger.metrics().lines_written(), 1);
    }

    fn shared_failing() -> SharedStream {
        crate::core::sink::shared_stream(FailingWriter)
    }

    #[test]
    fn test_flush_reports_failure() {
        let logger = Logger::builder("svc").stream(shared_failing()).build();
        assert!(logger.flush().is_err());

        let (logger, _buf) = plain_logger("svc", Level::Info);
        assert!(logger.flush().is_ok());
    }

    #[test]
    fn test_timestamp_segment_local() {
        let (buf, stream) = buffer();
        let logger = Logger::builder("svc")
            .timestamp_format(TimestampFormat::custom("%Y-%m-%d").expect("valid pattern"))
            .stream(stream)
            .build();

        logger.info("dated");

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(contents(&buf), format!("[INFO] [svc] [{}] dated\n", today));
    }

    #[test]
    fn test_timestamp_segment_utc() {
        let (buf, stream) = buffer();
        let logger = Logger::builder("svc")
            .timestamp_format(TimestampFormat::custom("%Y-%m-%d %Z").expect("valid pattern"))
            .use_utc(true)
            .stream(stream)
            .build();

        logger.info("dated");

        let today = chrono::Utc::now().format("%Y-%m-%d %Z").to_string();
        assert!(contents(&buf).contains(&today));
    }

    #[test]
    fn test_call_site_from_resolver() {
        let (buf, stream) = buffer();
        let logger = Logger::builder("svc")
            .include_timestamp(false)
            .show_file_and_line_number(true)
            .resolver(Arc::new(|depth: usize| {
                Some(CallSite::new("main.rs", 10 + depth as u32))
            }))
            .stream(stream)
            .build();

        logger.info("a");
        logger.log_with_depth(Level::Info, "b", 2);

        assert_eq!(
            contents(&buf),
            "[INFO] [svc] [main.rs:10] a\n[INFO] [svc] [main.rs:12] b\n"
        );
    }

    #[test]
    fn test_unresolved_call_site_uses_sentinel() {
        let (buf, stream) = buffer();
        let logger = Logger::builder("svc")
            .include_timestamp(false)
            .show_file_and_line_number(true)
            .resolver(Arc::new(NoopResolver))
            .stream(stream)
            .build();

        logger.warning("where am I");

        assert_eq!(contents(&buf), "[WARNING] [svc] [<unknown>:0] where am I\n");
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_backtrace_call_site_names_this_file() {
        let (buf, stream) = buffer();
        let logger = Logger::builder("svc")
            .include_timestamp(false)
            .show_file_and_line_number(true)
            .stream(stream)
            .build();

        logger.info("located");
        logger.log_with_depth(Level::Info, "too deep", 100_000);

        let output = contents(&buf);
        let mut lines = output.lines();
        let located = lines.next().expect("first line");
        assert!(located.contains("logger.rs:"), "got {:?}", located);
        assert!(!located.contains("<unknown>"));
        assert_eq!(lines.next(), Some("[INFO] [svc] [<unknown>:0] too deep"));
    }

    #[test]
    fn test_settings_are_live() {
        let (logger, buf) = plain_logger("svc", Level::Error);
        logger.info("hidden");
        logger.set_min_level(Level::Info);
        logger.info("shown");
        assert_eq!(contents(&buf), "[INFO] [svc] shown\n");
    }

    #[test]
    fn test_builder_applies_defaults() {
        let defaults = LoggerDefaults::default()
            .with_use_utc(true)
            .with_show_file_and_line_number(true);
        let logger = Logger::builder("svc")
            .defaults(defaults)
            .min_level(Level::Warning)
            .build();

        let settings = logger.settings();
        assert_eq!(settings.min_level, Level::Warning);
        assert!(settings.use_utc);
        assert!(settings.show_file_and_line_number);
        assert!(settings.include_timestamp);
        assert_eq!(settings.fatal_policy, FatalPolicy::Panic);
    }
}
