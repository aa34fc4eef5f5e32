//! CO₂ comparison view state
//!
//! Owns the distance text and active mode of the comparison view. Every
//! change recomputes the whole result; nothing is patched in place.

use std::fmt;

use domain::{EmissionRateTable, SavingsResult, TravelMode, compute_savings, convert_to_km};
use parking_lot::Mutex;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct ComparisonState {
    distance_text: String,
    mode: TravelMode,
    result: Option<SavingsResult>,
}

/// Emissions comparison service
pub struct EmissionsService {
    rates: EmissionRateTable,
    state: Mutex<ComparisonState>,
}

impl fmt::Debug for EmissionsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionsService")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl Default for EmissionsService {
    fn default() -> Self {
        Self::new()
    }
}

impl EmissionsService {
    /// Create a service using the standard rate table
    pub fn new() -> Self {
        Self::with_rates(EmissionRateTable::standard().clone())
    }

    /// Create a service using a custom rate table
    pub fn with_rates(rates: EmissionRateTable) -> Self {
        Self {
            rates,
            state: Mutex::new(ComparisonState::default()),
        }
    }

    /// Rate table in use
    pub const fn rates(&self) -> &EmissionRateTable {
        &self.rates
    }

    /// Replace the distance text and recompute
    pub fn set_distance(&self, distance_text: impl Into<String>) -> Option<SavingsResult> {
        let mut state = self.state.lock();
        state.distance_text = distance_text.into();
        self.recompute(&mut state)
    }

    /// Change the active mode and recompute
    pub fn set_mode(&self, mode: TravelMode) -> Option<SavingsResult> {
        let mut state = self.state.lock();
        state.mode = mode;
        self.recompute(&mut state)
    }

    /// Recompute from the current distance and mode
    pub fn calculate(&self) -> Option<SavingsResult> {
        let mut state = self.state.lock();
        self.recompute(&mut state)
    }

    /// Accept a distance handed over from the map view and calculate at once
    #[instrument(skip(self, distance_text))]
    pub fn receive_handoff(&self, distance_text: &str) -> Option<SavingsResult> {
        debug!(distance = distance_text, "Received distance from map view");
        self.set_distance(distance_text)
    }

    /// Last computed result; `None` when the distance was not usable
    pub fn result(&self) -> Option<SavingsResult> {
        self.state.lock().result.clone()
    }

    /// Current distance text
    pub fn distance_text(&self) -> String {
        self.state.lock().distance_text.clone()
    }

    /// Current active mode
    pub fn mode(&self) -> TravelMode {
        self.state.lock().mode
    }

    fn recompute(&self, state: &mut ComparisonState) -> Option<SavingsResult> {
        let km = convert_to_km(&state.distance_text);
        state.result = compute_savings(km, state.mode, &self.rates);
        debug!(km, mode = %state.mode, has_result = state.result.is_some(), "Recomputed savings");
        state.result.clone()
    }
}
