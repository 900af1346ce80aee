//! Logging setup on top of `tracing-subscriber`.

use crate::{EntitiesError, EntitiesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured level. Accepts any
/// `EnvFilter` directive, e.g. `restmodel_model=debug`.
pub const LOG_ENV: &str = "RESTMODEL_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive for this level. `fatal` has no tracing
    /// counterpart and maps to `error`.
    #[must_use]
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Fatal | Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fatal => "fatal",
            other => other.as_filter(),
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Include the event target (module path) in each line.
    pub with_target: bool,
    /// Single-line compact output.
    pub compact: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_target: true,
            compact: false,
        }
    }
}

impl LoggingConfig {
    /// The filter `init_logging` installs: `RESTMODEL_LOG` if set and
    /// valid, the configured level otherwise.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()))
    }
}

/// Installs a global `fmt` subscriber. Fails if one is installed already.
pub fn init_logging(config: &LoggingConfig) -> EntitiesResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(config.with_target);
    let result = if config.compact {
        builder.compact().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|error| EntitiesError::Logging(error.to_string()))
}
