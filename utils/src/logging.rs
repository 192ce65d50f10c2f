//! Structured logging initialisation.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: readable lines for a terminal.
//! - [`LogFormat::Json`]: newline-delimited JSON for log collectors.
//!
//! `RUST_LOG` overrides the caller-supplied `level` string when set
//! (e.g. `"info"`, `"warn,stels_wallet_core=debug"`).

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("unknown log format `{0}` (expected `human` or `json`)")]
    UnknownFormat(String),

    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
        })
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            filter: level.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// Returns [`LoggingError::AlreadyInitialised`] on a second call.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;

    let result = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(tfmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tfmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.map_err(|_| LoggingError::AlreadyInitialised)
}

/// Loggable stand-in for a secret: keeps only its length.
pub fn redact(secret: &str) -> String {
    format!("<redacted:{}>", secret.len())
}
