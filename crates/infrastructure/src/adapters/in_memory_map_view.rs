//! Headless map view
//!
//! Keeps the state a rendered map would show (center, zoom, path) and
//! computes the zoom level at which a bounding box fits the viewport on a
//! Web-Mercator tile map.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use application::ports::MapViewPort;
use domain::{BoundingBox, Coordinate, CoordinateSequence};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::config::MapConfig;

/// Edge length of one map tile in pixels
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web-Mercator projection
const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// Lowest zoom level used when fitting
pub const MIN_ZOOM: u8 = 1;

/// Highest zoom level used when fitting
pub const MAX_ZOOM: u8 = 18;

/// What the map currently shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    /// View center
    pub center: Option<Coordinate>,
    /// Zoom level
    pub zoom: Option<u8>,
    /// Drawn route path
    pub path: CoordinateSequence,
    /// Last bounds passed to `fit_bounds`
    pub fitted_bounds: Option<BoundingBox>,
}

/// In-memory [`MapViewPort`]
#[derive(Debug)]
pub struct InMemoryMapView {
    width_px: u32,
    height_px: u32,
    state: RwLock<MapSnapshot>,
}

impl InMemoryMapView {
    /// Create a view with the given viewport size in pixels
    #[must_use]
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
            state: RwLock::new(MapSnapshot {
                center: None,
                zoom: None,
                path: CoordinateSequence::empty(),
                fitted_bounds: None,
            }),
        }
    }

    /// Create a view from configuration
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.viewport_width, config.viewport_height)
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        self.state.read().clone()
    }

    /// Highest zoom level at which `bounds` fits the viewport
    #[must_use]
    pub fn zoom_to_fit(&self, bounds: &BoundingBox) -> u8 {
        let lon_fraction = bounds.lon_span().abs() / 360.0;
        let lat_fraction = (mercator_y(bounds.north) - mercator_y(bounds.south)).abs() / (2.0 * PI);

        let zoom_x = axis_zoom(f64::from(self.width_px), lon_fraction);
        let zoom_y = axis_zoom(f64::from(self.height_px), lat_fraction);
        let zoom = zoom_x.min(zoom_y).floor();

        zoom.clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as u8
    }
}

/// Normalized Mercator y (radians) of a latitude in degrees
fn mercator_y(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    (FRAC_PI_4 + lat / 2.0).tan().ln()
}

fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - FRAC_PI_2).to_degrees()
}

/// Zoom at which `fraction` of the world spans `pixels`
fn axis_zoom(pixels: f64, fraction: f64) -> f64 {
    if fraction <= f64::EPSILON {
        return f64::INFINITY;
    }
    (pixels / TILE_SIZE / fraction).log2()
}

/// Visual center of a box: midpoint in projected space
fn projected_center(bounds: &BoundingBox) -> Coordinate {
    let y = (mercator_y(bounds.north) + mercator_y(bounds.south)) / 2.0;
    Coordinate::new_unchecked(inverse_mercator_y(y), (bounds.west + bounds.east) / 2.0)
}

impl MapViewPort for InMemoryMapView {
    fn set_view(&self, center: Coordinate, zoom: u8) {
        let mut state = self.state.write();
        state.center = Some(center);
        state.zoom = Some(zoom);
    }

    fn draw_path(&self, path: &CoordinateSequence) {
        self.state.write().path = path.clone();
    }

    fn clear_path(&self) {
        self.state.write().path = CoordinateSequence::empty();
    }

    fn fit_bounds(&self, bounds: BoundingBox) {
        let zoom = self.zoom_to_fit(&bounds);
        let center = projected_center(&bounds);
        debug!(%center, zoom, "Fitted map to bounds");

        let mut state = self.state.write();
        state.center = Some(center);
        state.zoom = Some(zoom);
        state.fitted_bounds = Some(bounds);
    }
}
