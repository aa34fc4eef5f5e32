//! Map viewport control

use std::{fmt, sync::Arc};

use domain::{BoundingBox, Coordinate, CoordinateSequence};
use tracing::debug;

use crate::ports::MapViewPort;

/// Fraction of each span added on every side when fitting a path
pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// Pushes paths and view changes to the map
pub struct ViewportFitter {
    map: Arc<dyn MapViewPort>,
    padding_ratio: f64,
}

impl fmt::Debug for ViewportFitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportFitter")
            .field("padding_ratio", &self.padding_ratio)
            .finish_non_exhaustive()
    }
}

impl ViewportFitter {
    /// Create a fitter with the default padding
    pub fn new(map: Arc<dyn MapViewPort>) -> Self {
        Self::with_padding(map, DEFAULT_PADDING_RATIO)
    }

    /// Create a fitter with a custom padding ratio (negative values count as 0)
    pub fn with_padding(map: Arc<dyn MapViewPort>, padding_ratio: f64) -> Self {
        Self {
            map,
            padding_ratio: padding_ratio.max(0.0),
        }
    }

    /// Center the map on a position
    pub fn center_on(&self, center: Coordinate, zoom: u8) {
        debug!(%center, zoom, "Centering map");
        self.map.set_view(center, zoom);
    }

    /// Draw the path, or clear the map when there is none
    pub fn draw_path(&self, path: &CoordinateSequence) {
        if path.is_empty() {
            self.map.clear_path();
        } else {
            self.map.draw_path(path);
        }
    }

    /// Fit the viewport around a path.
    ///
    /// Does nothing for an empty path. Otherwise issues exactly one
    /// `fit_bounds` with the padded bounding box and returns it.
    pub fn fit_to_bounds(&self, path: &CoordinateSequence) -> Option<BoundingBox> {
        let bounds = path.bounds()?.padded(self.padding_ratio);
        debug!(?bounds, points = path.len(), "Fitting viewport");
        self.map.fit_bounds(bounds);
        Some(bounds)
    }

    /// Draw a route path and fit the view around it
    pub fn show_route(&self, path: &CoordinateSequence) -> Option<BoundingBox> {
        self.draw_path(path);
        self.fit_to_bounds(path)
    }

    /// Remove the drawn path
    pub fn clear(&self) {
        self.map.clear_path();
    }
}
