//! Place value object
//!
//! A free-text or resolved address string that is safe to send to the
//! routing backend.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Place;
//!
//! let place = Place::parse("  Madison, WI ").expect("valid place");
//! assert_eq!(place.as_str(), "Madison, WI");
//!
//! assert!(Place::parse("   ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Maximum accepted place length in characters
pub const MAX_PLACE_LEN: usize = 500;

/// A validated, non-empty address of at most [`MAX_PLACE_LEN`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Place(String);

impl Place {
    /// Validate raw input into a place
    ///
    /// Leading and trailing whitespace is stripped before validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingEndpoints` for blank input and
    /// `DomainError::InputTooLong` when the trimmed input exceeds the limit.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::MissingEndpoints);
        }
        let actual = trimmed.chars().count();
        if actual > MAX_PLACE_LEN {
            return Err(DomainError::InputTooLong {
                max: MAX_PLACE_LEN,
                actual,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Normalize widget output: trims and collapses runs of whitespace
    ///
    /// # Errors
    ///
    /// Same as [`Place::parse`].
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::parse(&collapsed)
    }

    /// Borrow the address text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the address text
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Place {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Place> for String {
    fn from(place: Place) -> Self {
        place.0
    }
}

impl AsRef<str> for Place {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_address() {
        let place = Place::parse("1 Infinite Loop, Cupertino").unwrap();
        assert_eq!(place.as_str(), "1 Infinite Loop, Cupertino");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let place = Place::parse("\t State St \n").unwrap();
        assert_eq!(place.as_str(), "State St");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(Place::parse(""), Err(DomainError::MissingEndpoints));
        assert_eq!(Place::parse("   "), Err(DomainError::MissingEndpoints));
    }

    #[test]
    fn accepts_exactly_max_length() {
        let raw = "a".repeat(MAX_PLACE_LEN);
        assert!(Place::parse(&raw).is_ok());
    }

    #[test]
    fn rejects_over_max_length() {
        let raw = "a".repeat(MAX_PLACE_LEN + 1);
        assert_eq!(
            Place::parse(&raw),
            Err(DomainError::InputTooLong {
                max: MAX_PLACE_LEN,
                actual: MAX_PLACE_LEN + 1
            })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let raw = "ß".repeat(MAX_PLACE_LEN);
        assert!(raw.len() > MAX_PLACE_LEN);
        assert!(Place::parse(&raw).is_ok());
    }

    #[test]
    fn normalize_collapses_whitespace() {
        let place = Place::normalize("  Capitol   Square,\n Madison ").unwrap();
        assert_eq!(place.as_str(), "Capitol Square, Madison");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let place: Place = serde_json::from_str("\"Madison\"").unwrap();
        assert_eq!(place.as_str(), "Madison");
        assert!(serde_json::from_str::<Place>("\"  \"").is_err());
        assert_eq!(serde_json::to_string(&place).unwrap(), "\"Madison\"");
    }
}
