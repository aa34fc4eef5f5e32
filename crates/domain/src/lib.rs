//! Domain layer for EcoRoute
//!
//! Contains the route and emissions model: value objects, route entities,
//! the encoded-polyline codec and the CO₂ comparison math.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod emissions;
pub mod entities;
pub mod errors;
pub mod polyline;
pub mod value_objects;

pub use emissions::{
    EmissionRateTable, KM_PER_MILE, ModeSaving, SavingsResult, compute_savings, convert_to_km,
};
pub use entities::*;
pub use errors::DomainError;
pub use polyline::PolylineError;
pub use value_objects::*;
