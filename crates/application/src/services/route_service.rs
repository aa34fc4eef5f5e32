//! Route calculation flow
//!
//! Validates the two place inputs, calls the routing backend and decodes the
//! returned path. Overlapping calculations are allowed: every call gets a
//! fresh [`RequestId`] and only the newest one may change the held result.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use domain::{CoordinateSequence, RouteRequest, RouteResult, TravelMode, polyline};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{error::RouteError, ports::RoutingPort};

/// Sequence number of a route calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A successfully calculated route with its decoded path
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedRoute {
    /// Calculation that produced this route
    pub id: RequestId,
    /// Validated request
    pub request: RouteRequest,
    /// Backend answer
    pub result: RouteResult,
    /// Decoded path; empty when absent or malformed
    pub path: CoordinateSequence,
}

/// Outcome of a calculation that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Newest calculation finished and is now the held result
    Completed(CalculatedRoute),
    /// A newer calculation was started meanwhile; this answer was dropped
    Superseded {
        /// The dropped calculation
        id: RequestId,
        /// The newest calculation at the time of the answer
        latest: RequestId,
    },
}

impl RouteOutcome {
    /// The route, if this outcome carries one
    pub const fn route(&self) -> Option<&CalculatedRoute> {
        match self {
            Self::Completed(route) => Some(route),
            Self::Superseded { .. } => None,
        }
    }
}

/// Route calculation service
pub struct RouteService {
    routing: Arc<dyn RoutingPort>,
    latest: AtomicU64,
    current: Mutex<Option<CalculatedRoute>>,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .field("current", &*self.current.lock())
            .finish_non_exhaustive()
    }
}

impl RouteService {
    /// Create a new route service
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            routing,
            latest: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// The held route, if the newest calculation succeeded
    pub fn current(&self) -> Option<CalculatedRoute> {
        self.current.lock().clone()
    }

    /// Most recently issued request id
    pub fn latest_request(&self) -> Option<RequestId> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(RequestId(n)),
        }
    }

    /// Validate the inputs and calculate a route.
    ///
    /// Validation failures return before any network call and leave the held
    /// result alone. A failed backend call clears it.
    #[instrument(skip(self, origin, destination), fields(mode = %mode))]
    pub async fn calculate_route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<RouteOutcome, RouteError> {
        let request =
            RouteRequest::from_raw(origin, destination, mode).map_err(RouteError::Validation)?;

        let id = RequestId(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(%id, "Requesting route");

        let response = self.routing.calculate_route(&request).await;

        let latest = RequestId(self.latest.load(Ordering::SeqCst));
        if id != latest {
            debug!(%id, %latest, ok = response.is_ok(), "Dropping superseded route response");
            return Ok(RouteOutcome::Superseded { id, latest });
        }

        match response {
            Ok(result) => {
                let path = decode_path(&result);
                info!(
                    %id,
                    distance = %result.distance,
                    duration = %result.duration,
                    points = path.len(),
                    "Route calculated"
                );
                let route = CalculatedRoute {
                    id,
                    request,
                    result,
                    path,
                };
                *self.current.lock() = Some(route.clone());
                Ok(RouteOutcome::Completed(route))
            },
            Err(e) => {
                warn!(%id, error = %e, "Route calculation failed");
                *self.current.lock() = None;
                Err(e)
            },
        }
    }
}

fn decode_path(result: &RouteResult) -> CoordinateSequence {
    let Some(encoded) = result.encoded_polyline.as_deref().filter(|p| !p.is_empty()) else {
        return CoordinateSequence::empty();
    };
    polyline::decode(encoded).unwrap_or_else(|e| {
        warn!(error = %e, "Malformed route polyline, showing route without path");
        CoordinateSequence::empty()
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use domain::DomainError;
    use tokio::sync::oneshot;

    use super::*;
    use crate::ports::MockRoutingPort;

    const ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn result_with(polyline: Option<&str>) -> RouteResult {
        RouteResult {
            distance: "5.3 mi".to_string(),
            duration: "12 mins".to_string(),
            encoded_polyline: polyline.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn missing_endpoint_makes_no_call() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route().times(0);
        let service = RouteService::new(Arc::new(mock));

        let err = service
            .calculate_route("Madison", "", TravelMode::Driving)
            .await
            .unwrap_err();

        assert_eq!(err, RouteError::Validation(DomainError::MissingEndpoints));
        assert_eq!(service.latest_request(), None);
    }

    #[tokio::test]
    async fn too_long_makes_no_call() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route().times(0);
        let service = RouteService::new(Arc::new(mock));

        let long = "a".repeat(501);
        let err = service
            .calculate_route(&long, "Chicago", TravelMode::Driving)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RouteError::Validation(DomainError::InputTooLong { .. })
        ));
    }

    #[tokio::test]
    async fn success_decodes_path() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route()
            .withf(|req| req.origin().as_str() == "Madison" && req.mode() == TravelMode::Transit)
            .returning(|_| Ok(result_with(Some(ENCODED))));
        let service = RouteService::new(Arc::new(mock));

        let outcome = service
            .calculate_route("Madison", "Chicago", TravelMode::Transit)
            .await
            .unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.id.get(), 1);
        assert_eq!(route.result.distance, "5.3 mi");
        assert_eq!(route.path.len(), 3);
        assert_eq!(service.current().unwrap().id, route.id);
    }

    #[tokio::test]
    async fn absent_polyline_gives_empty_path() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route()
            .returning(|_| Ok(result_with(None)));
        let service = RouteService::new(Arc::new(mock));

        let outcome = service
            .calculate_route("Madison", "Chicago", TravelMode::Walking)
            .await
            .unwrap();

        assert!(outcome.route().unwrap().path.is_empty());
    }

    #[tokio::test]
    async fn malformed_polyline_does_not_fail_route() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route()
            .returning(|_| Ok(result_with(Some("_p~iF~ps|U_"))));
        let service = RouteService::new(Arc::new(mock));

        let outcome = service
            .calculate_route("Madison", "Chicago", TravelMode::Driving)
            .await
            .unwrap();

        let route = outcome.route().unwrap();
        assert_eq!(route.result.duration, "12 mins");
        assert!(route.path.is_empty());
    }

    #[tokio::test]
    async fn failure_clears_held_result() {
        let mut mock = MockRoutingPort::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_calculate_route()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(result_with(Some(ENCODED))));
        mock.expect_calculate_route()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RouteError::Timeout { timeout_ms: 15_000 }));
        let service = RouteService::new(Arc::new(mock));

        service
            .calculate_route("Madison", "Chicago", TravelMode::Driving)
            .await
            .unwrap();
        assert!(service.current().is_some());

        let err = service
            .calculate_route("Madison", "Chicago", TravelMode::Driving)
            .await
            .unwrap_err();
        assert_eq!(err, RouteError::Timeout { timeout_ms: 15_000 });
        assert!(service.current().is_none());
    }

    #[tokio::test]
    async fn validation_failure_keeps_held_result() {
        let mut mock = MockRoutingPort::new();
        mock.expect_calculate_route()
            .times(1)
            .returning(|_| Ok(result_with(None)));
        let service = RouteService::new(Arc::new(mock));

        service
            .calculate_route("Madison", "Chicago", TravelMode::Driving)
            .await
            .unwrap();
        let _ = service
            .calculate_route("", "Chicago", TravelMode::Driving)
            .await;

        assert!(service.current().is_some());
    }

    /// Port whose first call waits until released, so a second call can
    /// overtake it
    struct GatedRouting {
        gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait::async_trait]
    impl RoutingPort for GatedRouting {
        async fn calculate_route(
            &self,
            request: &RouteRequest,
        ) -> Result<RouteResult, RouteError> {
            let gate = self.gate.lock().await.take();
            if let Some(gate) = gate {
                let _ = gate.await;
                return Ok(RouteResult {
                    distance: "stale".to_string(),
                    duration: "1 min".to_string(),
                    encoded_polyline: None,
                });
            }
            Ok(RouteResult {
                distance: format!("to {}", request.destination()),
                duration: "2 mins".to_string(),
                encoded_polyline: None,
            })
        }
    }

    #[tokio::test]
    async fn late_response_is_superseded() {
        let (release, gate) = oneshot::channel();
        let service = Arc::new(RouteService::new(Arc::new(GatedRouting {
            gate: tokio::sync::Mutex::new(Some(gate)),
        })));

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .calculate_route("Madison", "Chicago", TravelMode::Driving)
                    .await
            })
        };
        while service.latest_request().is_none() {
            tokio::task::yield_now().await;
        }

        let second = service
            .calculate_route("Madison", "Milwaukee", TravelMode::Driving)
            .await
            .unwrap();
        assert_eq!(second.route().unwrap().result.distance, "to Milwaukee");

        release.send(()).unwrap();
        let first = tokio::time::timeout(Duration::from_secs(1), first)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert_eq!(
            first,
            RouteOutcome::Superseded {
                id: RequestId(1),
                latest: RequestId(2),
            }
        );
        assert_eq!(
            service.current().unwrap().result.distance,
            "to Milwaukee"
        );
    }
}
