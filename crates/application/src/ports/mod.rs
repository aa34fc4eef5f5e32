//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod autocomplete_port;
mod geolocation_port;
mod map_view_port;
mod routing_port;
mod widget_loader_port;

#[cfg(test)]
pub use autocomplete_port::MockAutocompletePort;
pub use autocomplete_port::AutocompletePort;
#[cfg(test)]
pub use geolocation_port::MockGeolocationPort;
pub use geolocation_port::GeolocationPort;
#[cfg(test)]
pub use map_view_port::MockMapViewPort;
pub use map_view_port::MapViewPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
#[cfg(test)]
pub use widget_loader_port::MockWidgetLoaderPort;
pub use widget_loader_port::WidgetLoaderPort;
