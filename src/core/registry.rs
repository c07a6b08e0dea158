//! Named logger registry and package-level logging
//!
//! A [`Registry`] owns the loggers it creates and a root logger whose sinks
//! are the shared outputs used by the package-level functions. Most programs
//! use the lazily built [`global`] registry; tests and embedders can construct
//! their own and pass it around.

use super::{
    callsite::{default_resolver, CallSiteResolver},
    config::LoggerDefaults,
    level::Level,
    logger::Logger,
    sink::SharedStream,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Level new loggers get from [`Registry::get_or_create`]
pub const DEFAULT_LEVEL: Level = Level::Info;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry behind the package-level functions
pub fn global() -> &'static Registry {
    &GLOBAL
}

pub struct Registry {
    defaults: RwLock<LoggerDefaults>,
    loggers: RwLock<Vec<Arc<Logger>>>,
    resolver: Arc<dyn CallSiteResolver>,
    root: Arc<Logger>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(LoggerDefaults::default(), default_resolver())
    }

    #[must_use]
    pub fn with_defaults(defaults: LoggerDefaults) -> Self {
        Self::with_parts(defaults, default_resolver())
    }

    /// Use a different call-site resolver for every logger this registry
    /// creates, including the root logger
    #[must_use]
    pub fn with_resolver(resolver: Arc<dyn CallSiteResolver>) -> Self {
        Self::with_parts(LoggerDefaults::default(), resolver)
    }

    fn with_parts(defaults: LoggerDefaults, resolver: Arc<dyn CallSiteResolver>) -> Self {
        let root = Arc::new(Self::build_logger("", DEFAULT_LEVEL, &defaults, &resolver));
        Self {
            defaults: RwLock::new(defaults),
            loggers: RwLock::new(Vec::new()),
            resolver,
            root,
        }
    }

    fn build_logger(
        name: &str,
        level: Level,
        defaults: &LoggerDefaults,
        resolver: &Arc<dyn CallSiteResolver>,
    ) -> Logger {
        Logger::builder(name)
            .min_level(level)
            .defaults(defaults.clone())
            .resolver(Arc::clone(resolver))
            .build()
    }

    pub fn defaults(&self) -> LoggerDefaults {
        self.defaults.read().clone()
    }

    /// Replace the defaults used for loggers created from now on
    pub fn set_defaults(&self, defaults: LoggerDefaults) {
        *self.defaults.write() = defaults;
    }

    /// Create a logger and append it to the registry.
    ///
    /// Always returns a fresh instance. An existing logger with the same
    /// name keeps its place, so lookups keep finding the older one.
    pub fn new_logger(&self, name: impl Into<String>, level: Level) -> Arc<Logger> {
        let name = name.into();
        let logger = Arc::new(Self::build_logger(
            &name,
            level,
            &self.defaults.read(),
            &self.resolver,
        ));
        self.loggers.write().push(Arc::clone(&logger));
        logger
    }

    /// Append a logger built elsewhere, e.g. with [`Logger::builder`]
    pub fn register(&self, logger: Logger) -> Arc<Logger> {
        let logger = Arc::new(logger);
        self.loggers.write().push(Arc::clone(&logger));
        logger
    }

    /// First logger registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers
            .read()
            .iter()
            .find(|logger| logger.name() == name)
            .cloned()
    }

    /// First logger registered under `name`, created at `Info` on a miss
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{Level, Registry};
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new();
    /// let a = registry.get_or_create("db");
    /// let b = registry.get_or_create("db");
    /// assert!(Arc::ptr_eq(&a, &b));
    /// assert_eq!(a.min_level(), Level::Info);
    /// ```
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.write();
        if let Some(logger) = loggers.iter().find(|logger| logger.name() == name) {
            return Arc::clone(logger);
        }

        let logger = Arc::new(Self::build_logger(
            name,
            DEFAULT_LEVEL,
            &self.defaults.read(),
            &self.resolver,
        ));
        loggers.push(Arc::clone(&logger));
        logger
    }

    /// All registered loggers in creation order
    pub fn loggers(&self) -> Vec<Arc<Logger>> {
        self.loggers.read().clone()
    }

    /// The unnamed logger used by the package-level functions
    pub fn root(&self) -> &Arc<Logger> {
        &self.root
    }

    /// Add shared outputs for the package-level functions.
    ///
    /// Streams that are already outputs are ignored.
    pub fn add_output<I>(&self, streams: I)
    where
        I: IntoIterator<Item = SharedStream>,
    {
        self.root.attach(streams);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("defaults", &*self.defaults.read())
            .field("loggers", &self.loggers.read().len())
            .field("root", &self.root)
            .finish()
    }
}

/// Log a debug message through the global root logger
pub fn debug(message: impl AsRef<str>) {
    global().root().write(Level::Debug, message.as_ref(), 0);
}

pub fn debugf(args: fmt::Arguments<'_>) {
    global().root().write_args(Level::Debug, args, 0);
}

/// Log an info message through the global root logger
pub fn info(message: impl AsRef<str>) {
    global().root().write(Level::Info, message.as_ref(), 0);
}

pub fn infof(args: fmt::Arguments<'_>) {
    global().root().write_args(Level::Info, args, 0);
}

/// Log a warning through the global root logger
pub fn warning(message: impl AsRef<str>) {
    global().root().write(Level::Warning, message.as_ref(), 0);
}

pub fn warningf(args: fmt::Arguments<'_>) {
    global().root().write_args(Level::Warning, args, 0);
}

/// Log an error through the global root logger
pub fn error(message: impl AsRef<str>) {
    global().root().write(Level::Error, message.as_ref(), 0);
}

pub fn errorf(args: fmt::Arguments<'_>) {
    global().root().write_args(Level::Error, args, 0);
}

/// Log a fatal message through the global root logger, then terminate
/// according to its fatal policy
pub fn fatal(message: impl AsRef<str>) -> ! {
    global().root().fatal(message)
}

pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    global().root().fatalf(args)
}

/// Add shared outputs to the global root logger
pub fn add_output<I>(streams: I)
where
    I: IntoIterator<Item = SharedStream>,
{
    global().add_output(streams);
}
