//! Logging configuration for yearbook.
//!
//! This module provides initialization and configuration for the tracing-based
//! logging system used throughout yearbook.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// The default filter directive for this verbosity.
    ///
    /// Only the `yearbook` target follows the verbosity; dependencies such as
    /// hyper stay at `warn`.
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("warn,yearbook={}", self.to_level_filter())
    }
}

/// Install the global subscriber.
///
/// Events go to stderr so `summary --json` and `config show --json` keep a
/// clean stdout. `RUST_LOG`, when set, replaces the verbosity directive.
/// Calling this twice is harmless; the second call is ignored.
///
/// ```no_run
/// use yearbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(verbosity == Verbosity::Trace),
        )
        .try_init();
}
