//! Map view port
//!
//! The interactive map is owned by the presentation side. Services only push
//! view changes into it; they never read pixels back.

use domain::{BoundingBox, Coordinate, CoordinateSequence};
#[cfg(test)]
use mockall::automock;

/// Sink for map view changes
#[cfg_attr(test, automock)]
pub trait MapViewPort: Send + Sync {
    /// Center the map on a coordinate at a zoom level
    fn set_view(&self, center: Coordinate, zoom: u8);

    /// Replace the drawn route path
    fn draw_path(&self, path: &CoordinateSequence);

    /// Remove any drawn route path
    fn clear_path(&self);

    /// Adjust the viewport so the bounds are fully visible
    fn fit_bounds(&self, bounds: BoundingBox);
}
