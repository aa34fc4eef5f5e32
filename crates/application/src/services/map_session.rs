//! One map page session
//!
//! Wires position lookup, place capture, routing and the viewport together:
//! the map opens on the resolved position, and each successful route is
//! drawn and framed. The distance of the held route can be handed to the
//! emissions comparison.

use std::{fmt, sync::Arc};

use domain::{Coordinate, SavingsResult, TravelMode};
use tracing::{info, instrument};

use crate::{
    error::RouteError,
    services::{
        CalculatedRoute, EmissionsService, GeoLocator, PlaceResolver, RouteOutcome, RouteService,
        ViewportFitter,
    },
};

/// Zoom level the map opens with
pub const DEFAULT_ZOOM: u8 = 12;

/// Map page orchestration
pub struct MapSession {
    locator: GeoLocator,
    places: Arc<PlaceResolver>,
    routes: RouteService,
    viewport: ViewportFitter,
    default_zoom: u8,
}

impl fmt::Debug for MapSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSession")
            .field("locator", &self.locator)
            .field("routes", &self.routes)
            .field("default_zoom", &self.default_zoom)
            .finish_non_exhaustive()
    }
}

impl MapSession {
    /// Create a session opening at [`DEFAULT_ZOOM`]
    pub fn new(
        locator: GeoLocator,
        places: Arc<PlaceResolver>,
        routes: RouteService,
        viewport: ViewportFitter,
    ) -> Self {
        Self {
            locator,
            places,
            routes,
            viewport,
            default_zoom: DEFAULT_ZOOM,
        }
    }

    /// Override the opening zoom level
    #[must_use]
    pub const fn with_default_zoom(mut self, zoom: u8) -> Self {
        self.default_zoom = zoom;
        self
    }

    /// Place inputs of this session
    pub fn places(&self) -> &PlaceResolver {
        &self.places
    }

    /// Resolve the initial position and center the map on it
    #[instrument(skip(self))]
    pub async fn start(&self) -> Coordinate {
        let position = self.locator.resolve_initial_position().await;
        self.viewport.center_on(position, self.default_zoom);
        info!(%position, zoom = self.default_zoom, "Map session started");
        position
    }

    /// Calculate a route between the held origin and destination.
    ///
    /// On completion the path is drawn and framed. A superseded answer
    /// changes nothing. A backend failure clears the drawn path.
    #[instrument(skip(self))]
    pub async fn calculate(&self, mode: TravelMode) -> Result<RouteOutcome, RouteError> {
        self.places.pump();
        let origin = self.places.origin().unwrap_or_default();
        let destination = self.places.destination().unwrap_or_default();

        match self.routes.calculate_route(&origin, &destination, mode).await {
            Ok(RouteOutcome::Completed(route)) => {
                self.viewport.show_route(&route.path);
                Ok(RouteOutcome::Completed(route))
            },
            Ok(superseded) => Ok(superseded),
            Err(e) => {
                if !e.is_validation() {
                    self.viewport.clear();
                }
                Err(e)
            },
        }
    }

    /// Route currently shown
    pub fn current_route(&self) -> Option<CalculatedRoute> {
        self.routes.current()
    }

    /// Distance text of the current route, for the emissions comparison
    pub fn distance_for_handoff(&self) -> Option<String> {
        self.routes.current().map(|route| route.result.distance)
    }

    /// Pass the current distance to the comparison view, which calculates
    /// right away
    pub fn hand_off(&self, emissions: &EmissionsService) -> Option<SavingsResult> {
        let distance = self.distance_for_handoff()?;
        emissions.receive_handoff(&distance)
    }
}
