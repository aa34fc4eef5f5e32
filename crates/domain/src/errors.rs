//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Origin or destination is missing or blank
    #[error("missing endpoints")]
    MissingEndpoints,

    /// Origin or destination exceeds the maximum place length
    #[error("input too long: {actual} characters (max {max})")]
    InputTooLong {
        /// Maximum allowed length in characters
        max: usize,
        /// Length of the rejected input
        actual: usize,
    },

    /// Latitude or longitude out of range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates {
        /// Rejected latitude, formatted
        latitude: String,
        /// Rejected longitude, formatted
        longitude: String,
    },

    /// Travel mode name not recognised
    #[error("Unknown travel mode: {0}")]
    UnknownTravelMode(String),

    /// Emission rate table rejected (duplicate mode or invalid rate)
    #[error("Invalid emission rate table: {0}")]
    InvalidRateTable(String),
}

impl DomainError {
    /// Create an invalid coordinates error
    pub fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }

    /// Whether the error is a user-correctable input problem on a place
    #[must_use]
    pub const fn is_place_validation(&self) -> bool {
        matches!(self, Self::MissingEndpoints | Self::InputTooLong { .. })
    }
}
