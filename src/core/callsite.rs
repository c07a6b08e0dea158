//! Call-site resolution
//!
//! Looking up the source file and line of the code that issued a log call is
//! a pluggable capability. Targets that cannot walk their own stack install
//! [`NoopResolver`] and every line falls back to [`CallSite::unknown`].

use std::fmt;
use std::sync::Arc;

/// File and line of the code that issued a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub const UNKNOWN_FILE: &'static str = "<unknown>";

    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Sentinel used when resolution fails
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN_FILE, 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.file == Self::UNKNOWN_FILE && self.line == 0
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves the call site `call_depth` frames outside the logging library.
///
/// Depth 0 is the code that called into the library; every frame that
/// belongs to the library itself is skipped first, so wrappers such as the
/// package-level functions need no adjustment.
pub trait CallSiteResolver: Send + Sync {
    fn resolve(&self, call_depth: usize) -> Option<CallSite>;
}

impl<F> CallSiteResolver for F
where
    F: Fn(usize) -> Option<CallSite> + Send + Sync,
{
    fn resolve(&self, call_depth: usize) -> Option<CallSite> {
        self(call_depth)
    }
}

/// Resolver for targets without stack introspection
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl CallSiteResolver for NoopResolver {
    fn resolve(&self, _call_depth: usize) -> Option<CallSite> {
        None
    }
}

/// Stack-walking resolver backed by the `backtrace` crate.
///
/// Needs debug info to report file names; without it every lookup is
/// unresolved.
#[cfg(feature = "backtrace")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceResolver;

#[cfg(feature = "backtrace")]
impl BacktraceResolver {
    const CRATE_PREFIX: &'static str = concat!(env!("CARGO_CRATE_NAME"), "::");

    fn is_library_symbol(name: &str) -> bool {
        let name = name.trim_start_matches('<');
        name.starts_with(Self::CRATE_PREFIX) && !name.contains("::tests::")
    }
}

#[cfg(feature = "backtrace")]
impl CallSiteResolver for BacktraceResolver {
    fn resolve(&self, call_depth: usize) -> Option<CallSite> {
        let trace = backtrace::Backtrace::new();

        // Inlined functions show up as extra symbols on a single frame, so
        // count symbols rather than frames.
        let symbols: Vec<_> = trace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .collect();

        let in_library = |symbol: &&backtrace::BacktraceSymbol| {
            symbol
                .name()
                .map(|name| Self::is_library_symbol(&format!("{:#}", name)))
                .unwrap_or(false)
        };

        // Anchor on the innermost library frame: a log call made from user
        // code that the library is itself running reports its own line.
        let library_entry = symbols.iter().position(in_library)?;
        let innermost_caller = library_entry
            + symbols[library_entry..]
                .iter()
                .position(|symbol| !in_library(symbol))?;

        let symbol = symbols.get(innermost_caller.checked_add(call_depth)?)?;
        let file = symbol.filename()?;
        let line = symbol.lineno()?;
        Some(CallSite::new(file.display().to_string(), line))
    }
}

/// The resolver new registries and loggers start with
pub fn default_resolver() -> Arc<dyn CallSiteResolver> {
    #[cfg(feature = "backtrace")]
    {
        Arc::new(BacktraceResolver)
    }
    #[cfg(not(feature = "backtrace"))]
    {
        Arc::new(NoopResolver)
    }
}
