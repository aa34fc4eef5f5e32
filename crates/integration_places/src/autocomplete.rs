//! Nominatim autocomplete client
//!
//! Suggests formatted addresses for partial input using the Nominatim
//! `/search` endpoint. The provider is probed once through `/status` before
//! use, which also verifies the credential for keyed providers.
//!
//! Requests are spaced according to `min_interval_ms` (Nominatim allows at
//! most one request per second) and suggestions are cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::PlacesConfig;
use crate::error::PlacesError;

/// Trait for place autocomplete providers
#[async_trait]
pub trait AutocompleteClient: Send + Sync {
    /// Check the provider is reachable and accepts the configured credential
    async fn probe(&self) -> Result<(), PlacesError>;

    /// Formatted-address suggestions for partial input
    async fn suggest(&self, query: &str) -> Result<Vec<String>, PlacesError>;
}

/// Nominatim-based autocomplete client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimAutocompleteClient {
    client: Client,
    config: PlacesConfig,
    cache: Cache<String, Vec<String>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimAutocompleteClient {
    /// Create a new autocomplete client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        config.validate().map_err(PlacesError::RequestFailed)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("EcoRoute/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.caching_enabled() {
            Duration::from_secs(config.cache_ttl_minutes * 60)
        } else {
            Duration::from_millis(1) // Minimal TTL when "disabled"
        };

        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Space requests according to the provider's usage policy
    async fn rate_limit(&self) {
        let min_interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < min_interval {
                let wait = min_interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting autocomplete request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Append the credential to query parameters when configured
    fn with_key(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        if let Some(key) = self.config.api_key.as_ref().filter(|k| !k.is_empty()) {
            params.push(("key", key.clone()));
        }
        params
    }

    fn check_status(status: StatusCode) -> Result<(), PlacesError> {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(PlacesError::InvalidCredential(format!("HTTP {status}")))
            },
            s if !s.is_success() => Err(PlacesError::RequestFailed(format!("HTTP {s}"))),
            _ => Ok(()),
        }
    }

    fn parse_suggestions(body: &str, limit: usize) -> Result<Vec<String>, PlacesError> {
        let results: Vec<NominatimPlace> =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        let mut suggestions: Vec<String> = Vec::with_capacity(results.len());
        for name in results.into_iter().filter_map(|r| r.display_name) {
            let name = name.trim().to_string();
            if !name.is_empty() && !suggestions.contains(&name) {
                suggestions.push(name);
            }
        }
        suggestions.truncate(limit);
        Ok(suggestions)
    }
}

#[async_trait]
impl AutocompleteClient for NominatimAutocompleteClient {
    #[instrument(skip(self))]
    async fn probe(&self) -> Result<(), PlacesError> {
        let params = self.with_key(vec![("format", "json".to_string())]);

        let response = self
            .client
            .get(self.url("/status"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PlacesError::from_transport(&e, self.config.timeout_secs))?;

        Self::check_status(response.status())?;
        debug!("Autocomplete provider ready");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn suggest(&self, query: &str) -> Result<Vec<String>, PlacesError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let cache_key = query.to_lowercase();
        if let Some(cached) = self.cache.get(&cache_key).await {
            debug!(%query, "Autocomplete cache hit");
            return Ok(cached);
        }

        self.rate_limit().await;

        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.max_suggestions.to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }
        let params = self.with_key(params);

        let response = self
            .client
            .get(self.url("/search"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PlacesError::from_transport(&e, self.config.timeout_secs))?;

        Self::check_status(response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;
        let suggestions =
            Self::parse_suggestions(&body, usize::from(self.config.max_suggestions))?;

        if self.config.caching_enabled() {
            self.cache.insert(cache_key, suggestions.clone()).await;
        }

        debug!(count = suggestions.len(), "Autocomplete suggestions");
        Ok(suggestions)
    }
}

/// Nominatim search result (only the fields used)
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggestions() {
        let json = r#"[
            {"place_id": 1, "display_name": "Madison, Dane County, Wisconsin, United States"},
            {"place_id": 2, "display_name": "Madison, Madison County, Alabama, United States"}
        ]"#;
        let suggestions = NominatimAutocompleteClient::parse_suggestions(json, 5).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("Madison, Dane County"));
    }

    #[test]
    fn test_parse_suggestions_dedupes_and_limits() {
        let json = r#"[
            {"display_name": "A"}, {"display_name": "A"}, {"display_name": " "},
            {}, {"display_name": "B"}, {"display_name": "C"}
        ]"#;
        let suggestions = NominatimAutocompleteClient::parse_suggestions(json, 2).unwrap();
        assert_eq!(suggestions, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(NominatimAutocompleteClient::parse_suggestions("oops", 5).is_err());
    }

    #[test]
    fn test_check_status() {
        assert!(NominatimAutocompleteClient::check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            NominatimAutocompleteClient::check_status(StatusCode::UNAUTHORIZED),
            Err(PlacesError::InvalidCredential(_))
        ));
        assert!(matches!(
            NominatimAutocompleteClient::check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(PlacesError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_with_key() {
        let mut config = PlacesConfig::for_testing();
        let client = NominatimAutocompleteClient::new(&config).unwrap();
        assert!(client.with_key(Vec::new()).is_empty());

        config.api_key = Some("pk.test".to_string());
        let client = NominatimAutocompleteClient::new(&config).unwrap();
        assert_eq!(
            client.with_key(Vec::new()),
            vec![("key", "pk.test".to_string())]
        );
    }

    #[tokio::test]
    async fn test_blank_query_skips_network() {
        let config = PlacesConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..PlacesConfig::for_testing()
        };
        let client = NominatimAutocompleteClient::new(&config).unwrap();
        assert!(client.suggest("   ").await.unwrap().is_empty());
    }
}
