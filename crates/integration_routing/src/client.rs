//! HTTP routing client
//!
//! Posts route requests to the backend and turns every failure into one of
//! the [`RoutingError`] kinds.

use std::time::Duration;

use async_trait::async_trait;
use domain::{RouteRequest, RouteResult};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{ApiErrorBody, ApiRouteResponse};

/// Path of the route calculation endpoint
pub const CALCULATE_ROUTE_PATH: &str = "/api/calculate-route";

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Send a validated request to the routing backend
    async fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError>;
}

/// Routing client backed by `reqwest`
#[derive(Debug)]
pub struct HttpRoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl HttpRoutingClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config
            .validate()
            .map_err(|e| RoutingError::Unexpected(format!("invalid routing configuration: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RoutingError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Map a transport-level failure to an error kind
    fn classify(&self, err: &reqwest::Error) -> RoutingError {
        if err.is_timeout() {
            RoutingError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if err.is_connect() || err.is_request() {
            RoutingError::Network(err.to_string())
        } else {
            RoutingError::Unexpected(err.to_string())
        }
    }

    /// Build a server error from a non-success response body
    fn server_error(status: u16, body: &str) -> RoutingError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message());
        RoutingError::Server { status, message }
    }

    /// Parse a success body into a route result
    fn parse_route_response(body: &str) -> Result<RouteResult, RoutingError> {
        let raw: ApiRouteResponse = serde_json::from_str(body)
            .map_err(|e| RoutingError::Unexpected(format!("invalid response body: {e}")))?;
        raw.into_route_result().map_err(RoutingError::Unexpected)
    }
}

#[async_trait]
impl RoutingClient for HttpRoutingClient {
    #[instrument(skip(self, request), fields(mode = %request.mode()))]
    async fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError> {
        let url = self.config.endpoint(CALCULATE_ROUTE_PATH);
        debug!(%url, "Requesting route");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(&e))?;

        if !status.is_success() {
            let err = Self::server_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Routing backend returned an error");
            return Err(err);
        }

        let result = Self::parse_route_response(&body)?;
        debug!(
            distance = %result.distance,
            duration = %result.duration,
            has_path = result.has_path(),
            "Route received"
        );
        Ok(result)
    }
}
