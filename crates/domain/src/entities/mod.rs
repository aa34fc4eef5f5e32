//! Domain entities - Route request/result and the geometry derived from them

mod bounding_box;
mod coordinate_sequence;
mod route;

pub use bounding_box::BoundingBox;
pub use coordinate_sequence::CoordinateSequence;
pub use route::{RouteRequest, RouteResult};
