//! Diagnostics for the `fraudgraph` binary.
//!
//! Spans and events from the pipeline stages go to stderr, leaving stdout to
//! the run summary. `FRAUDGRAPH_LOG_FORMAT` picks plain text or JSON lines and
//! `RUST_LOG` picks the level. Records emitted through the `log` facade are
//! forwarded into the same subscriber.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "FRAUDGRAPH_LOG_FORMAT";
const DEFAULT_LEVEL: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Reasons the diagnostics subscriber could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `FRAUDGRAPH_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("FRAUDGRAPH_LOG_FORMAT is not valid UTF-8")]
    FormatNotUnicode {
        /// Lookup failure reported by the environment.
        #[source]
        source: env::VarError,
    },
    /// `FRAUDGRAPH_LOG_FORMAT` named neither `human` nor `json`.
    #[error("FRAUDGRAPH_LOG_FORMAT must be `human` or `json`, got `{value}`")]
    UnknownFormat {
        /// The normalised value that was rejected.
        value: String,
    },
    /// The stderr subscriber could not be registered globally.
    #[error("could not register the stderr log subscriber: {source}")]
    SubscriberInstall {
        /// Registration failure from `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// How diagnostics are laid out on stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Plain text, one line per event plus a line per closed span.
    #[default]
    Human,
    /// JSON lines carrying the current span and its ancestors.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat {
                value: other.to_owned(),
            }),
        }
    }
}

/// Sets up stderr diagnostics once per process; later calls return `Ok`.
///
/// When another subscriber already owns the global slot, the existing one is
/// kept and told about it through a warning.
///
/// # Errors
/// Fails with [`LoggingError::FormatNotUnicode`] or
/// [`LoggingError::UnknownFormat`] when `FRAUDGRAPH_LOG_FORMAT` is unusable.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let format = resolve_format(env::var(LOG_FORMAT_ENV))?;
    if let Err(LoggingError::SubscriberInstall { source }) = install_subscriber(format) {
        tracing::warn!(error = %source, "keeping the subscriber installed by the host");
    }
    let _ = INSTALLED.set(());
    Ok(())
}

/// Interprets the raw lookup of `FRAUDGRAPH_LOG_FORMAT`; unset means human.
fn resolve_format(lookup: Result<String, env::VarError>) -> Result<LogFormat, LoggingError> {
    match lookup {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => {
            Err(LoggingError::FormatNotUnicode { source })
        }
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    // Stage timings are reported when each span closes.
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Human => base.boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Fails only when a `log` logger is already set.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|source| LoggingError::SubscriberInstall { source })
}
