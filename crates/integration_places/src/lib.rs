//! Place autocomplete and device-position lookup for EcoRoute
//!
//! [`NominatimAutocompleteClient`] turns partial address text into
//! formatted-address suggestions using a Nominatim-compatible API
//! (OpenStreetMap, or a keyed provider such as LocationIQ).
//! [`IpGeolocationClient`] performs a one-shot position lookup used as the
//! device location when no better source is available.

mod autocomplete;
mod config;
mod error;
mod geolocation;

pub use autocomplete::{AutocompleteClient, NominatimAutocompleteClient};
pub use config::{IpGeolocationConfig, PlacesConfig};
pub use error::PlacesError;
pub use geolocation::IpGeolocationClient;
