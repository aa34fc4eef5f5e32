//! `tracing-subscriber` setup
//!
//! Filter precedence: explicit override (CLI verbosity) → `RUST_LOG` →
//! configured filter. Output goes to stderr.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives (e.g., "warn", "application=debug,reqwest=warn")
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the filter directives do not parse.
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| format!("invalid filter '{}': {e}", self.filter))
    }
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter directives could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

fn build_filter(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(directives) = override_filter {
        return EnvFilter::try_new(directives).map_err(|e| TelemetryError::Filter(e.to_string()));
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(&config.filter).map_err(|e| TelemetryError::Filter(e.to_string()))
        },
    }
}

/// Install the global subscriber.
///
/// `override_filter` wins over both `RUST_LOG` and the configured filter.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let filter = build_filter(config, override_filter)?;

    let (text_layer, json_layer) = match config.format {
        LogFormat::Text => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = %config.format, "Logging initialized");
    Ok(())
}
