//! Structured logging for generation runs.
//!
//! Two knobs exist:
//! - the log **format** (`TB_LOG_FORMAT`): human-readable lines or JSON, and
//! - the process-wide **verbose** flag, set by the CLI (or `TB_VERBOSE=true`) before
//!   generation begins and read thereafter.
//!
//! Verbose output is gated by the flag, not by the log level: [`verbose_log!`] emits at
//! `info` when the flag is on and does nothing otherwise. `RUST_LOG` still overrides the
//! filter for debugging the tool itself.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Log format: pretty lines for terminals, JSON for CI log collectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log at `info` level only when verbose mode is on.
///
/// ```rust
/// tbmaker::verbose_log!("Processing {} templates", 3);
/// ```
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            ::tracing::info!($($arg)*);
        }
    };
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that piping the tool's stdout (help, version) stays clean.
/// Calling this twice is an error from `try_init`, reported with context.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
