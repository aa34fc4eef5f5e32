//! Origin and destination capture
//!
//! Holds the free text for the two place slots. Selections made in the
//! autocomplete widget arrive as [`SelectionEvent`]s on a channel and are
//! normalized before being stored. The widget itself is loaded lazily and at
//! most once; when it cannot load, the slots still accept plain typing.

use std::{fmt, sync::Arc};

use domain::Place;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tracing::{debug, instrument, warn};

use crate::{
    init_once::{InitOnce, InitState},
    ports::{AutocompletePort, WidgetLoaderPort},
};

/// One of the two place inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Where the route starts
    Origin,
    /// Where the route ends
    Destination,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A place picked from the autocomplete widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Slot the selection belongs to
    pub slot: Slot,
    /// Address text as formatted by the provider
    pub formatted_address: String,
}

impl SelectionEvent {
    /// Create a new selection event
    pub fn new(slot: Slot, formatted_address: impl Into<String>) -> Self {
        Self {
            slot,
            formatted_address: formatted_address.into(),
        }
    }
}

/// Handle given to the widget side for reporting selections
#[derive(Debug, Clone)]
pub struct SelectionSender(mpsc::UnboundedSender<SelectionEvent>);

impl SelectionSender {
    /// Queue a selection. Returns `false` if the resolver is gone.
    pub fn select(&self, slot: Slot, formatted_address: impl Into<String>) -> bool {
        self.0
            .send(SelectionEvent::new(slot, formatted_address))
            .is_ok()
    }
}

#[derive(Debug, Default)]
struct Slots {
    origin: Option<String>,
    destination: Option<String>,
}

impl Slots {
    fn get_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Origin => &mut self.origin,
            Slot::Destination => &mut self.destination,
        }
    }
}

/// Captures origin and destination text
pub struct PlaceResolver {
    loader: Arc<dyn WidgetLoaderPort>,
    autocomplete: Arc<dyn AutocompletePort>,
    widget: InitOnce,
    slots: Mutex<Slots>,
    sender: mpsc::UnboundedSender<SelectionEvent>,
    events: AsyncMutex<mpsc::UnboundedReceiver<SelectionEvent>>,
}

impl fmt::Debug for PlaceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceResolver")
            .field("widget", &self.widget)
            .field("slots", &*self.slots.lock())
            .finish_non_exhaustive()
    }
}

impl PlaceResolver {
    /// Create a resolver with empty slots and an unloaded widget
    pub fn new(loader: Arc<dyn WidgetLoaderPort>, autocomplete: Arc<dyn AutocompletePort>) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        Self {
            loader,
            autocomplete,
            widget: InitOnce::new("autocomplete-widget"),
            slots: Mutex::new(Slots::default()),
            sender,
            events: AsyncMutex::new(events),
        }
    }

    /// Load the widget if that has not happened yet.
    ///
    /// Safe to call on every remount. Returns whether the widget is usable.
    #[instrument(skip(self))]
    pub async fn ensure_ready(&self) -> bool {
        let loader = Arc::clone(&self.loader);
        let outcome = self
            .widget
            .get_or_init(|| async move {
                loader.load().await.map_err(|e| {
                    warn!(error = %e, "Autocomplete unavailable, falling back to plain text input");
                    e.to_string()
                })
            })
            .await;
        outcome.is_ok()
    }

    /// Current widget state
    pub fn widget_state(&self) -> InitState {
        self.widget.state()
    }

    /// Handle for reporting widget selections
    pub fn sender(&self) -> SelectionSender {
        SelectionSender(self.sender.clone())
    }

    /// Apply every queued selection without waiting. Returns how many were
    /// applied; 0 when [`Self::run`] currently owns the queue.
    pub fn pump(&self) -> usize {
        let Ok(mut events) = self.events.try_lock() else {
            return 0;
        };
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            self.apply(&event);
            applied += 1;
        }
        applied
    }

    /// Apply selections as they arrive, until the task is cancelled
    pub async fn run(&self) {
        let mut events = self.events.lock().await;
        while let Some(event) = events.recv().await {
            self.apply(&event);
        }
    }

    fn apply(&self, event: &SelectionEvent) {
        if self.on_select(event.slot, &event.formatted_address).is_none() {
            debug!(slot = %event.slot, "Ignoring invalid selection");
        }
    }

    /// Store a widget selection after normalizing it.
    ///
    /// Returns `None` and leaves the slot untouched if the text is not a
    /// usable place.
    pub fn on_select(&self, slot: Slot, raw: &str) -> Option<Place> {
        let place = Place::normalize(raw).ok()?;
        debug!(%slot, place = %place, "Place selected");
        *self.slots.lock().get_mut(slot) = Some(place.as_str().to_string());
        Some(place)
    }

    /// Store typed text as-is
    pub fn set_text(&self, slot: Slot, raw: impl Into<String>) {
        *self.slots.lock().get_mut(slot) = Some(raw.into());
    }

    /// Suggestions for a partial query.
    ///
    /// Empty when the widget is not available or the provider fails.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn suggest(&self, slot: Slot, query: &str) -> Vec<String> {
        if query.trim().is_empty() || !self.ensure_ready().await {
            return Vec::new();
        }
        match self.autocomplete.suggest(query).await {
            Ok(suggestions) => {
                debug!(%slot, count = suggestions.len(), "Got suggestions");
                suggestions
            },
            Err(e) => {
                warn!(%slot, error = %e, "Suggestion lookup failed");
                Vec::new()
            },
        }
    }

    /// Held origin text
    pub fn origin(&self) -> Option<String> {
        self.slots.lock().origin.clone()
    }

    /// Held destination text
    pub fn destination(&self) -> Option<String> {
        self.slots.lock().destination.clone()
    }
}
