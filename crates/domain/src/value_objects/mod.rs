//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod place;
mod travel_mode;

pub use coordinate::Coordinate;
pub use place::{MAX_PLACE_LEN, Place};
pub use travel_mode::TravelMode;
