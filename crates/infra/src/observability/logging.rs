use std::fmt;
use std::str::FromStr;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as layer_fmt, EnvFilter};
use usercheck_domain::{Result, UsercheckError};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "usercheck=info,usercheck_core=info,usercheck_infra=info";

/// Shape of emitted log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one event per line
    #[default]
    Pretty,
    /// Newline-delimited JSON events
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = UsercheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(UsercheckError::InvalidInput(format!("Unknown log format: {other}"))),
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// # Errors
/// Returns `UsercheckError::Internal` if a global subscriber is already set.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let registry = tracing_subscriber::registry().with(filter());

    let installed = match format {
        LogFormat::Pretty => registry
            .with(layer_fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(layer_fmt::layer().json().with_writer(std::io::stderr).with_current_span(true))
            .try_init(),
    };

    installed.map_err(|e| {
        UsercheckError::Internal(format!("Failed to install tracing subscriber: {e}"))
    })
}
