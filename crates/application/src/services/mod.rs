//! Application services - Use case implementations

mod emissions_service;
mod geo_locator;
mod map_session;
mod place_resolver;
mod route_service;
mod viewport_fitter;

pub use emissions_service::EmissionsService;
pub use geo_locator::GeoLocator;
pub use map_session::{DEFAULT_ZOOM, MapSession};
pub use place_resolver::{PlaceResolver, SelectionEvent, SelectionSender, Slot};
pub use route_service::{CalculatedRoute, RequestId, RouteOutcome, RouteService};
pub use viewport_fitter::{DEFAULT_PADDING_RATIO, ViewportFitter};
