//! Route request and result entities

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Place, TravelMode};

/// One origin-destination-mode query
///
/// Built from validated places when the user triggers a calculation and
/// never modified afterwards. Serializes to the routing backend's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequest {
    origin: Place,
    destination: Place,
    mode: TravelMode,
}

impl RouteRequest {
    /// Create a request from already validated places
    #[must_use]
    pub const fn new(origin: Place, destination: Place, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
        }
    }

    /// Validate raw origin/destination text and build a request
    ///
    /// # Errors
    ///
    /// `MissingEndpoints` if either side is blank (checked for both sides
    /// before length), otherwise `InputTooLong` if either side is too long.
    pub fn from_raw(
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Self, DomainError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(DomainError::MissingEndpoints);
        }
        Ok(Self::new(
            Place::parse(origin)?,
            Place::parse(destination)?,
            mode,
        ))
    }

    /// Origin place
    #[must_use]
    pub const fn origin(&self) -> &Place {
        &self.origin
    }

    /// Destination place
    #[must_use]
    pub const fn destination(&self) -> &Place {
        &self.destination
    }

    /// Requested travel mode
    #[must_use]
    pub const fn mode(&self) -> TravelMode {
        self.mode
    }
}

/// The backend's answer to a [`RouteRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Service-formatted distance, e.g. "5.3 mi"
    pub distance: String,
    /// Service-formatted duration, e.g. "12 mins"
    pub duration: String,
    /// Encoded path, if the backend supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_polyline: Option<String>,
}

impl RouteResult {
    /// Whether there is a path to decode
    #[must_use]
    pub fn has_path(&self) -> bool {
        self.encoded_polyline
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_valid() {
        let req = RouteRequest::from_raw("Madison", "Chicago", TravelMode::Transit).unwrap();
        assert_eq!(req.origin().as_str(), "Madison");
        assert_eq!(req.destination().as_str(), "Chicago");
        assert_eq!(req.mode(), TravelMode::Transit);
    }

    #[test]
    fn missing_takes_precedence_over_too_long() {
        let long = "x".repeat(600);
        assert_eq!(
            RouteRequest::from_raw(&long, "", TravelMode::Driving),
            Err(DomainError::MissingEndpoints)
        );
    }

    #[test]
    fn too_long_destination() {
        let long = "x".repeat(501);
        let err = RouteRequest::from_raw("Madison", &long, TravelMode::Driving).unwrap_err();
        assert!(matches!(err, DomainError::InputTooLong { actual: 501, .. }));
    }

    #[test]
    fn serializes_wire_body() {
        let req = RouteRequest::from_raw("A", "B", TravelMode::Walking).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"origin": "A", "destination": "B", "mode": "walking"})
        );
    }

    #[test]
    fn has_path() {
        let mut result = RouteResult {
            distance: "1 mi".into(),
            duration: "2 mins".into(),
            encoded_polyline: None,
        };
        assert!(!result.has_path());
        result.encoded_polyline = Some(String::new());
        assert!(!result.has_path());
        result.encoded_polyline = Some("_p~iF~ps|U".into());
        assert!(result.has_path());
    }
}
