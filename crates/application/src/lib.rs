//! Application layer - Use cases and orchestration
//!
//! Contains the map-session pipeline (position, places, routing, viewport)
//! and the emissions comparison, plus the port definitions adapters
//! implement. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod init_once;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, RouteError};
pub use init_once::{InitOnce, InitState};
pub use ports::*;
pub use services::*;
