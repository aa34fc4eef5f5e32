//! Places adapter - Implements the autocomplete ports using integration_places
//!
//! One adapter serves both sides of the widget: [`WidgetLoaderPort`] probes
//! the provider (and its credential) and [`AutocompletePort`] fetches
//! suggestions.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{AutocompletePort, WidgetLoaderPort},
};
use async_trait::async_trait;
use integration_places::{
    AutocompleteClient, NominatimAutocompleteClient, PlacesConfig, PlacesError,
};
use tracing::{debug, instrument};

/// Adapter for the place autocomplete provider
pub struct PlacesAdapter {
    client: Arc<dyn AutocompleteClient>,
}

impl std::fmt::Debug for PlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesAdapter").finish_non_exhaustive()
    }
}

impl PlacesAdapter {
    /// Wrap an existing autocomplete client
    #[must_use]
    pub fn new(client: Arc<dyn AutocompleteClient>) -> Self {
        Self { client }
    }

    /// Build a Nominatim client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &PlacesConfig) -> Result<Self, ApplicationError> {
        let client = NominatimAutocompleteClient::new(config)
            .map_err(|e| ApplicationError::Configuration(format!("Places client: {e}")))?;
        Ok(Self::new(Arc::new(client)))
    }
}

fn map_places_error(err: PlacesError) -> ApplicationError {
    match err {
        PlacesError::InvalidCredential(reason) => {
            ApplicationError::Configuration(format!("Autocomplete credential rejected: {reason}"))
        },
        PlacesError::PositionUnavailable(reason) => ApplicationError::Unavailable(reason),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

#[async_trait]
impl WidgetLoaderPort for PlacesAdapter {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<(), ApplicationError> {
        self.client.probe().await.map_err(map_places_error)?;
        debug!("Autocomplete provider ready");
        Ok(())
    }
}

#[async_trait]
impl AutocompletePort for PlacesAdapter {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApplicationError> {
        self.client.suggest(query).await.map_err(map_places_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClient {
        probe_ok: bool,
    }

    #[async_trait]
    impl AutocompleteClient for FixedClient {
        async fn probe(&self) -> Result<(), PlacesError> {
            if self.probe_ok {
                Ok(())
            } else {
                Err(PlacesError::InvalidCredential("HTTP 401".into()))
            }
        }

        async fn suggest(&self, query: &str) -> Result<Vec<String>, PlacesError> {
            Ok(vec![format!("{query}, Wisconsin, USA")])
        }
    }

    #[tokio::test]
    async fn load_maps_credential_failure() {
        let adapter = PlacesAdapter::new(Arc::new(FixedClient { probe_ok: false }));
        let err = adapter.load().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn suggest_passes_through() {
        let adapter = PlacesAdapter::new(Arc::new(FixedClient { probe_ok: true }));
        assert!(adapter.load().await.is_ok());
        let suggestions = adapter.suggest("Madison").await.unwrap();
        assert_eq!(suggestions, vec!["Madison, Wisconsin, USA".to_string()]);
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            map_places_error(PlacesError::Timeout { timeout_secs: 5 }),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            map_places_error(PlacesError::PositionUnavailable("x".into())),
            ApplicationError::Unavailable(_)
        ));
    }
}
