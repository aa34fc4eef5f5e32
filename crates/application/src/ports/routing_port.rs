//! Route calculation port
//!
//! Defines the interface to the routing backend. The infrastructure adapter
//! wraps the HTTP client and classifies its failures into [`RouteError`].

use async_trait::async_trait;
use domain::{RouteRequest, RouteResult};
#[cfg(test)]
use mockall::automock;

use crate::error::RouteError;

/// Port for route calculation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Issue one route request for an already validated request.
    ///
    /// # Errors
    ///
    /// Returns `Server`, `Timeout`, `Network` or `Unexpected`; validation
    /// happens before this port is reached.
    async fn calculate_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError>;
}
