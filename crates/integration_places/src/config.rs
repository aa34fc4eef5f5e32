//! Places and geolocation provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim-compatible autocomplete provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Base URL of the provider
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API credential, sent as the `key` query parameter when set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Suggestion cache TTL in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Maximum number of suggestions per query
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u8,

    /// Country code filter (e.g., "us"); empty means worldwide
    #[serde(default)]
    pub country_filter: String,

    /// Minimum spacing between requests in milliseconds (Nominatim usage policy)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

const fn default_max_suggestions() -> u8 {
    5
}

const fn default_min_interval_ms() -> u64 {
    1100
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            max_suggestions: default_max_suggestions(),
            country_filter: String::new(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl PlacesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            cache_ttl_minutes: 0,
            min_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
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
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_suggestions == 0 || self.max_suggestions > 20 {
            return Err("max_suggestions must be between 1 and 20".to_string());
        }
        Ok(())
    }
}

/// Configuration for the IP-based position lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpGeolocationConfig {
    /// Lookup URL returning `{latitude, longitude}` or `{lat, lon}` JSON
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

impl Default for IpGeolocationConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlacesConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert!(config.api_key.is_none());
        assert_eq!(config.max_suggestions, 5);
        assert!(config.caching_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = PlacesConfig::for_testing();
        assert!(!config.caching_enabled());
        assert_eq!(config.min_interval_ms, 0);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = PlacesConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = PlacesConfig {
            max_suggestions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = PlacesConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ip_geolocation_defaults() {
        let config = IpGeolocationConfig::default();
        assert!(config.lookup_url.starts_with("https://"));
        assert_eq!(config.timeout_secs, 5);
    }
}
