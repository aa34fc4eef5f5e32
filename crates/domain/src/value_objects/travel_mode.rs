//! Travel mode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Mode of travel for routing and emissions lookup
///
/// Exactly one mode is active at a time; it selects both the routing
/// service mode and the emission rate table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Private car
    #[default]
    Driving,
    /// On foot
    Walking,
    /// Bicycle
    Bicycling,
    /// Public transit
    Transit,
}

impl TravelMode {
    /// All modes, in emission rate table order
    pub const ALL: [Self; 4] = [Self::Driving, Self::Transit, Self::Bicycling, Self::Walking];

    /// Wire name understood by the routing backend
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Walking => "Walking",
            Self::Bicycling => "Bicycling",
            Self::Transit => "Public Transit",
        }
    }

    /// Wire name with its first letter capitalised, as shown in savings lines
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Walking => "Walking",
            Self::Bicycling => "Bicycling",
            Self::Transit => "Transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(Self::Driving),
            "walking" | "walk" => Ok(Self::Walking),
            "bicycling" | "cycling" | "bike" => Ok(Self::Bicycling),
            "transit" | "public_transit" | "bus" => Ok(Self::Transit),
            _ => Err(DomainError::UnknownTravelMode(s.to_string())),
        }
    }
}
