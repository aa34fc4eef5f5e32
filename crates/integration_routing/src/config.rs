//! Routing service configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the backend routing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard bound on a single route request in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

fn default_user_agent() -> String {
    format!("EcoRoute/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_ms: 2_000,
            ..Default::default()
        }
    }

    /// Full URL of the route calculation endpoint
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url is not a valid URL: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must use http or https, got {}", url.scheme()));
        }

        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }

        Ok(())
    }
}
