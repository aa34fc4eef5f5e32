//! Initial position configuration

use std::fmt;

use domain::Coordinate;
use integration_places::IpGeolocationConfig;
use serde::{Deserialize, Serialize};

/// Where the initial map position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationProvider {
    /// Look up the public IP address
    #[default]
    Ip,
    /// Use the configured fixed coordinates
    Fixed,
    /// No position source; always use the fallback
    None,
}

impl fmt::Display for GeolocationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Fixed => write!(f, "fixed"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for GeolocationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "fixed" => Ok(Self::Fixed),
            "none" | "off" => Ok(Self::None),
            _ => Err(format!(
                "Invalid geolocation provider: {s}. Use 'ip', 'fixed' or 'none'"
            )),
        }
    }
}

/// Initial position configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationAppConfig {
    /// Position source (default: ip)
    #[serde(default)]
    pub provider: GeolocationProvider,

    /// IP lookup endpoint
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// IP lookup timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Latitude for the `fixed` provider
    #[serde(default)]
    pub fixed_latitude: Option<f64>,

    /// Longitude for the `fixed` provider
    #[serde(default)]
    pub fixed_longitude: Option<f64>,

    /// Latitude used when no position is available (default: Madison, WI)
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    /// Longitude used when no position is available
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,

    /// Zoom level the map opens with
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
}

fn default_ip_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_fallback_latitude() -> f64 {
    43.0731
}

const fn default_fallback_longitude() -> f64 {
    -89.4012
}

const fn default_zoom() -> u8 {
    12
}

impl Default for GeolocationAppConfig {
    fn default() -> Self {
        Self {
            provider: GeolocationProvider::default(),
            ip_lookup_url: default_ip_lookup_url(),
            timeout_secs: default_timeout_secs(),
            fixed_latitude: None,
            fixed_longitude: None,
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            default_zoom: default_zoom(),
        }
    }
}

impl GeolocationAppConfig {
    /// Fallback position
    pub fn fallback(&self) -> Result<Coordinate, String> {
        Coordinate::new(self.fallback_latitude, self.fallback_longitude)
            .map_err(|e| format!("fallback position: {e}"))
    }

    /// Fixed position, if both coordinates are configured
    pub fn fixed_position(&self) -> Option<Result<Coordinate, String>> {
        let (lat, lon) = self.fixed_latitude.zip(self.fixed_longitude)?;
        Some(Coordinate::new(lat, lon).map_err(|e| format!("fixed position: {e}")))
    }

    /// Convert to `integration_places::IpGeolocationConfig`
    #[must_use]
    pub fn to_ip_config(&self) -> IpGeolocationConfig {
        IpGeolocationConfig {
            lookup_url: self.ip_lookup_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.fallback()?;
        if !(1..=18).contains(&self.default_zoom) {
            return Err(format!(
                "default_zoom must be between 1 and 18, got {}",
                self.default_zoom
            ));
        }
        match self.provider {
            GeolocationProvider::Fixed => match self.fixed_position() {
                Some(position) => position.map(|_| ()),
                None => Err(
                    "provider 'fixed' requires fixed_latitude and fixed_longitude".to_string(),
                ),
            },
            GeolocationProvider::Ip if self.ip_lookup_url.is_empty() => {
                Err("ip_lookup_url must not be empty".to_string())
            },
            GeolocationProvider::Ip | GeolocationProvider::None => Ok(()),
        }
    }
}
