//! One-shot IP-based position lookup

use std::time::Duration;

use domain::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::IpGeolocationConfig;
use crate::error::PlacesError;

/// Looks up the approximate position of this machine from its public IP
#[derive(Debug)]
pub struct IpGeolocationClient {
    client: Client,
    config: IpGeolocationConfig,
}

impl IpGeolocationClient {
    /// Create a new lookup client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &IpGeolocationConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("EcoRoute/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Perform a single lookup
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<Coordinate, PlacesError> {
        let response = self
            .client
            .get(&self.config.lookup_url)
            .send()
            .await
            .map_err(|e| PlacesError::from_transport(&e, self.config.timeout_secs))?;

        if !response.status().is_success() {
            return Err(PlacesError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;
        let position = Self::parse_position(&body)?;
        debug!(%position, "Resolved position from IP");
        Ok(position)
    }

    fn parse_position(body: &str) -> Result<Coordinate, PlacesError> {
        let raw: RawPosition =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        if raw.status.as_deref() == Some("fail") || raw.error.unwrap_or(false) {
            let reason = raw
                .message
                .or(raw.reason)
                .unwrap_or_else(|| "lookup failed".to_string());
            return Err(PlacesError::PositionUnavailable(reason));
        }

        match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
                .map_err(|e| PlacesError::PositionUnavailable(e.to_string())),
            _ => Err(PlacesError::PositionUnavailable(
                "response has no coordinates".to_string(),
            )),
        }
    }
}

/// Lookup response; accepts both `latitude/longitude` and `lat/lon` styles
#[derive(Debug, Deserialize)]
struct RawPosition {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
    status: Option<String>,
    message: Option<String>,
    error: Option<bool>,
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latitude_longitude() {
        let pos =
            IpGeolocationClient::parse_position(r#"{"latitude": 43.07, "longitude": -89.4}"#)
                .unwrap();
        assert!((pos.latitude() - 43.07).abs() < 1e-9);
    }

    #[test]
    fn test_parse_lat_lon() {
        let pos = IpGeolocationClient::parse_position(
            r#"{"status": "success", "lat": 52.52, "lon": 13.405}"#,
        )
        .unwrap();
        assert!((pos.longitude() - 13.405).abs() < 1e-9);
    }

    #[test]
    fn test_parse_failure_reason() {
        let err = IpGeolocationClient::parse_position(
            r#"{"status": "fail", "message": "reserved range"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PlacesError::PositionUnavailable(m) if m == "reserved range"));

        let err = IpGeolocationClient::parse_position(
            r#"{"error": true, "reason": "RateLimited"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PlacesError::PositionUnavailable(m) if m == "RateLimited"));
    }

    #[test]
    fn test_parse_missing_or_invalid_coordinates() {
        assert!(IpGeolocationClient::parse_position("{}").is_err());
        assert!(
            IpGeolocationClient::parse_position(r#"{"latitude": 123.0, "longitude": 0.0}"#)
                .is_err()
        );
    }
}
