//! Routing adapter - Implements RoutingPort using integration_routing

use application::{error::ApplicationError, error::RouteError, ports::RoutingPort};
use async_trait::async_trait;
use domain::{RouteRequest, RouteResult};
use integration_routing::{HttpRoutingClient, RoutingClient, RoutingConfig, RoutingError};
use tracing::{debug, instrument};

/// Adapter for the route calculation backend
#[derive(Debug)]
pub struct RoutingAdapter {
    client: HttpRoutingClient,
}

impl RoutingAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: HttpRoutingClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        let client = HttpRoutingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(format!("Routing client: {e}")))?;
        Ok(Self::new(client))
    }
}

/// Classify an integration failure into the user-facing route error kinds
pub(crate) fn map_routing_error(err: RoutingError) -> RouteError {
    match err {
        RoutingError::Server { status, message } => RouteError::Server { status, message },
        RoutingError::Timeout { timeout_ms } => RouteError::Timeout { timeout_ms },
        RoutingError::Network(reason) => RouteError::Network(reason),
        RoutingError::Unexpected(reason) => RouteError::Unexpected(reason),
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, request), fields(mode = %request.mode()))]
    async fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let result = self
            .client
            .calculate_route(request)
            .await
            .map_err(map_routing_error)?;
        debug!(distance = %result.distance, "Routing backend answered");
        Ok(result)
    }
}
