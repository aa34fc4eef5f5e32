//! Application configuration
//!
//! Split into focused sub-modules:
//! - `geolocation`: initial position source and fallback
//! - `map`: viewport size and route padding
//!
//! The routing and places sections reuse the integration crates' own
//! configuration types; logging lives with [`crate::telemetry`].

mod geolocation;
mod map;

use std::path::Path;

use integration_places::PlacesConfig;
use integration_routing::RoutingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::telemetry::LoggingConfig;

pub use geolocation::{GeolocationAppConfig, GeolocationProvider};
pub use map::MapConfig;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ecoroute";

/// Prefix of environment overrides, e.g. `ECOROUTE_ROUTING__BASE_URL`
pub const ENV_PREFIX: &str = "ECOROUTE";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or values could not be deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A section holds an invalid value
    #[error("Invalid [{section}] configuration: {message}")]
    Invalid {
        /// Section name
        section: &'static str,
        /// What is wrong
        message: String,
    },
}

impl ConfigError {
    fn invalid(section: &'static str) -> impl FnOnce(String) -> Self {
        move |message| Self::Invalid { section, message }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing backend
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Place autocomplete provider
    #[serde(default)]
    pub places: PlacesConfig,

    /// Initial position
    #[serde(default)]
    pub geolocation: GeolocationAppConfig,

    /// Map viewport
    #[serde(default)]
    pub map: MapConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// Without an explicit path, `ecoroute.toml` in the working directory is
    /// used if it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Self::load`], reading `ECOROUTE_*` variables from `env`
    /// instead of the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .set_default("routing.base_url", "http://localhost:8000")?
            .set_default("logging.filter", "warn")?
            .add_source(file)
            // Override with environment variables (e.g., ECOROUTE_ROUTING__TIMEOUT_MS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?path, "Configuration loaded");
        Ok(config)
    }

    /// Load and validate
    pub fn load_validated(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routing
            .validate()
            .map_err(ConfigError::invalid("routing"))?;
        self.places
            .validate()
            .map_err(ConfigError::invalid("places"))?;
        self.geolocation
            .validate()
            .map_err(ConfigError::invalid("geolocation"))?;
        self.map.validate().map_err(ConfigError::invalid("map"))?;
        self.logging
            .validate()
            .map_err(ConfigError::invalid("logging"))?;
        Ok(())
    }
}
