//! Service wiring from configuration

use std::sync::Arc;

use application::{
    GeoLocator, MapSession, PlaceResolver, RouteService, ViewportFitter, ports::GeolocationPort,
};
use domain::Coordinate;
use infrastructure::{
    AppConfig, FixedGeolocationAdapter, InMemoryMapView, PlacesAdapter, RoutingAdapter,
    geolocation_from_config,
};

/// A map session together with the view it draws into
#[derive(Debug)]
pub struct MapPage {
    pub session: MapSession,
    pub map: Arc<InMemoryMapView>,
}

/// Position source: `--here` wins over the configured provider
pub fn build_locator(config: &AppConfig, here: Option<Coordinate>) -> anyhow::Result<GeoLocator> {
    let source: Arc<dyn GeolocationPort> = match here {
        Some(position) => Arc::new(FixedGeolocationAdapter::new(position)),
        None => geolocation_from_config(&config.geolocation)?,
    };
    let fallback = config.geolocation.fallback().map_err(anyhow::Error::msg)?;
    Ok(GeoLocator::with_fallback(source, fallback))
}

/// Place inputs backed by the configured autocomplete provider
pub fn build_place_resolver(config: &AppConfig) -> anyhow::Result<PlaceResolver> {
    let places = Arc::new(PlacesAdapter::from_config(&config.places)?);
    Ok(PlaceResolver::new(places.clone(), places))
}

/// Wire a complete map session
pub fn build_map_page(config: &AppConfig, here: Option<Coordinate>) -> anyhow::Result<MapPage> {
    let routing = RoutingAdapter::from_config(&config.routing)?;
    let map = Arc::new(InMemoryMapView::from_config(&config.map));

    let session = MapSession::new(
        build_locator(config, here)?,
        Arc::new(build_place_resolver(config)?),
        RouteService::new(Arc::new(routing)),
        ViewportFitter::with_padding(map.clone(), config.map.padding_ratio),
    )
    .with_default_zoom(config.geolocation.default_zoom);

    Ok(MapPage { session, map })
}
