//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Madison, WI - the default map center when no device position is known
    #[must_use]
    pub const fn madison() -> Self {
        Self::new_unchecked(43.0731, -89.4012)
    }

    /// Whether both components are within `tolerance` degrees of `other`
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = DomainError;

    /// Parse `"lat,lon"` (whitespace around either part is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidCoordinates {
                latitude: s.to_string(),
                longitude: String::new(),
            })?;
        let parse = |part: &str| part.trim().parse::<f64>();
        match (parse(lat), parse(lon)) {
            (Ok(lat), Ok(lon)) => Self::new(lat, lon),
            _ => Err(DomainError::InvalidCoordinates {
                latitude: lat.trim().to_string(),
                longitude: lon.trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let c = Coordinate::new(43.0731, -89.4012).expect("valid coordinates");
        assert!((c.latitude() - 43.0731).abs() < f64::EPSILON);
        assert!((c.longitude() + 89.4012).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let c = Coordinate::new(52.52, 13.405).expect("valid");
        assert_eq!(c.to_string(), "52.520000, 13.405000");
    }

    #[test]
    fn test_from_str() {
        let c: Coordinate = " 52.5 , 13.4 ".parse().expect("parse");
        assert!(c.approx_eq(&Coordinate::new_unchecked(52.5, 13.4), 1e-9));
        assert!("52.5".parse::<Coordinate>().is_err());
        assert!("north,east".parse::<Coordinate>().is_err());
        assert!("95,0".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_serialization() {
        let c = Coordinate::new(52.52, 13.405).expect("valid");
        let json = serde_json::to_string(&c).expect("serialize");
        assert!(json.contains("\"latitude\":52.52"));

        let deserialized: Coordinate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(c, deserialized);
    }

    #[test]
    fn test_madison_default() {
        let c = Coordinate::madison();
        assert!((c.latitude() - 43.0731).abs() < 1e-9);
        assert!(Coordinate::new(c.latitude(), c.longitude()).is_ok());
    }
}
