//! Routing backend integration for EcoRoute
//!
//! Sends route requests to the backend routing service
//! (`POST /api/calculate-route`) and classifies every way the call can fail.
//!
//! # Architecture
//!
//! [`RoutingClient`] defines the interface, implemented by
//! [`HttpRoutingClient`] on top of `reqwest`. It takes an already validated
//! [`domain::RouteRequest`]; the request is bounded by
//! [`RoutingConfig::timeout_ms`] (15 s by default).
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{RouteRequest, TravelMode};
//! use integration_routing::{HttpRoutingClient, RoutingClient, RoutingConfig};
//!
//! let client = HttpRoutingClient::new(&RoutingConfig::default())?;
//! let request = RouteRequest::from_raw("Madison, WI", "Chicago, IL", TravelMode::Driving)?;
//! let route = client.calculate_route(&request).await?;
//! println!("{} in {}", route.distance, route.duration);
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{CALCULATE_ROUTE_PATH, HttpRoutingClient, RoutingClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use models::{ApiErrorBody, ApiRouteResponse};
