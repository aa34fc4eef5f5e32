//! Initial map position
//!
//! Asks the position source once per session and falls back to a fixed
//! location when it fails. Never surfaces an error to the caller.

use std::{fmt, sync::Arc};

use domain::Coordinate;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use crate::ports::GeolocationPort;

/// Resolves the position the map starts centered on
pub struct GeoLocator {
    source: Arc<dyn GeolocationPort>,
    fallback: Coordinate,
    resolved: OnceCell<Coordinate>,
}

impl fmt::Debug for GeoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoLocator")
            .field("fallback", &self.fallback)
            .field("resolved", &self.resolved.get())
            .finish_non_exhaustive()
    }
}

impl GeoLocator {
    /// Create a locator falling back to Madison, WI
    pub fn new(source: Arc<dyn GeolocationPort>) -> Self {
        Self::with_fallback(source, Coordinate::madison())
    }

    /// Create a locator with an explicit fallback position
    pub fn with_fallback(source: Arc<dyn GeolocationPort>, fallback: Coordinate) -> Self {
        Self {
            source,
            fallback,
            resolved: OnceCell::new(),
        }
    }

    /// Fallback position used when the source fails
    pub const fn fallback(&self) -> Coordinate {
        self.fallback
    }

    /// Resolve the initial position.
    ///
    /// The source is consulted on the first call only; later calls return
    /// the memoised answer without prompting again.
    #[instrument(skip(self))]
    pub async fn resolve_initial_position(&self) -> Coordinate {
        *self
            .resolved
            .get_or_init(|| async {
                match self.source.current_position().await {
                    Ok(position) => {
                        debug!(%position, "Using device position");
                        position
                    },
                    Err(e) => {
                        warn!(
                            reason = %e,
                            fallback = %self.fallback,
                            "Position unavailable, using fallback"
                        );
                        self.fallback
                    },
                }
            })
            .await
    }
}
