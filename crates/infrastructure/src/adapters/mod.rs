//! Adapters implementing application ports

mod geolocation_adapter;
mod in_memory_map_view;
mod places_adapter;
mod routing_adapter;

pub use geolocation_adapter::{
    FixedGeolocationAdapter, IpGeolocationAdapter, UnavailableGeolocation, geolocation_from_config,
};
pub use in_memory_map_view::{InMemoryMapView, MAX_ZOOM, MIN_ZOOM, MapSnapshot};
pub use places_adapter::PlacesAdapter;
pub use routing_adapter::RoutingAdapter;
