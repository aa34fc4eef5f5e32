//! Position sources implementing GeolocationPort

use std::sync::Arc;

use application::{error::ApplicationError, ports::GeolocationPort};
use async_trait::async_trait;
use domain::Coordinate;
use integration_places::{IpGeolocationClient, PlacesError};
use tracing::instrument;

use crate::config::{GeolocationAppConfig, GeolocationProvider};

/// Position from a public-IP lookup
#[derive(Debug)]
pub struct IpGeolocationAdapter {
    client: IpGeolocationClient,
}

impl IpGeolocationAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: IpGeolocationClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeolocationPort for IpGeolocationAdapter {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinate, ApplicationError> {
        self.client.locate().await.map_err(|e| match e {
            PlacesError::PositionUnavailable(reason) => ApplicationError::Unavailable(reason),
            other => ApplicationError::ExternalService(format!("IP lookup failed: {other}")),
        })
    }
}

/// Position fixed by configuration or command line
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocationAdapter {
    position: Coordinate,
}

impl FixedGeolocationAdapter {
    /// Always report `position`
    #[must_use]
    pub const fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationPort for FixedGeolocationAdapter {
    async fn current_position(&self) -> Result<Coordinate, ApplicationError> {
        Ok(self.position)
    }
}

/// No position capability
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGeolocation;

#[async_trait]
impl GeolocationPort for UnavailableGeolocation {
    async fn current_position(&self) -> Result<Coordinate, ApplicationError> {
        Err(ApplicationError::Unavailable(
            "geolocation is not available".to_string(),
        ))
    }
}

/// Build the position source selected in configuration
///
/// # Errors
///
/// Returns an error if the selected source is misconfigured.
pub fn geolocation_from_config(
    config: &GeolocationAppConfig,
) -> Result<Arc<dyn GeolocationPort>, ApplicationError> {
    match config.provider {
        GeolocationProvider::Ip => {
            let client = IpGeolocationClient::new(&config.to_ip_config())
                .map_err(|e| ApplicationError::Configuration(format!("IP lookup client: {e}")))?;
            Ok(Arc::new(IpGeolocationAdapter::new(client)))
        },
        GeolocationProvider::Fixed => {
            let position = config
                .fixed_position()
                .ok_or_else(|| {
                    ApplicationError::Configuration(
                        "fixed geolocation requires fixed_latitude and fixed_longitude".into(),
                    )
                })?
                .map_err(ApplicationError::Configuration)?;
            Ok(Arc::new(FixedGeolocationAdapter::new(position)))
        },
        GeolocationProvider::None => Ok(Arc::new(UnavailableGeolocation)),
    }
}
