//! Optional console output for gantry's tracing events.
//!
//! Only compiled with the `logging` feature.
//!
//! Gantry reports progress through [`tracing`] events and leaves subscriber
//! choice to the host. A host that already runs a subscriber needs nothing
//! from this module: its own filter governs gantry's events like any other
//! crate's. A host without one can install the fallback here, which enables
//! gantry's targets only and never sets a process-wide level over the host's
//! own events.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted by [`try_init_from_env`].
pub const LOG_ENV: &str = "GANTRY_LOG";

/// Verbosity of the fallback output.
///
/// Build failures are never logged; they surface as [`Error`](crate::Error)
/// values returned to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No build output.
    Silent,
    /// Build progress: the build-start and built-in-N-ms events (default).
    #[default]
    Info,
    /// Progress plus config assembly and dev server wiring detail.
    Debug,
}

impl LogLevel {
    /// Filter directive enabling gantry's own events at this level.
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Silent => "gantry=off",
            LogLevel::Info => "gantry=info",
            LogLevel::Debug => "gantry=debug",
        }
    }
}

/// Error returned when a [`LogLevel`] keyword is not recognized.
#[derive(Debug, Error)]
#[error("unrecognized log level `{0}`, expected silent, info, or debug")]
pub struct ParseLogLevelError(String);

impl std::str::FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(ParseLogLevelError(other.to_owned())),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            LogLevel::Silent => "silent",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(keyword)
    }
}

/// Install the fallback subscriber at the given level.
///
/// Returns `false` without changing anything when a global subscriber is
/// already set, so the host's own setup always wins over the fallback.
/// When it does install, the filter enables gantry's targets only; events
/// from the host and other crates pass through unprinted. Output is compact
/// lines carrying the event target.
///
/// # Example
///
/// ```rust,no_run
/// use gantry::logging::{LogLevel, try_init};
///
/// try_init(LogLevel::Debug);
/// ```
pub fn try_init(level: LogLevel) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(level.directive()))
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

/// Install the fallback subscriber at the level named by `GANTRY_LOG`.
///
/// Accepts `silent` (or `off`), `info`, and `debug`, case insensitively.
/// An unset or unrecognized value falls back to [`LogLevel::Info`].
///
/// # Example
///
/// ```rust,no_run
/// gantry::logging::try_init_from_env();
/// ```
pub fn try_init_from_env() -> bool {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|raw| raw.parse::<LogLevel>().ok())
        .unwrap_or_default();
    try_init(level)
}
