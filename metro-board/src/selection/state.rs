//! Selection state: the chosen line, station, and last known coordinate.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::warn;

use crate::domain::{Coordinate, Line};

use super::store::KeyValueStore;

/// Storage key for the selected line id.
const KEY_ROUTE: &str = "selectedRoute";
/// Storage key for the selected station name.
const KEY_STATION: &str = "selectedStation";
/// Storage key for the last known coordinate, as `"lat,lon"`.
const KEY_LOCATION: &str = "location";

const DEFAULT_STATION: &str = "台北車站";

/// Default coordinate, near the default station.
fn default_coordinate() -> Coordinate {
    Coordinate::new(25.046255, 121.517532).expect("default coordinate is in range")
}

/// A snapshot of the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub line: Line,
    pub station: String,
    pub coordinate: Coordinate,
}

/// The live selection, persisted on every mutation.
///
/// Constructed once at startup from the store (falling back to defaults
/// where keys are absent or unparsable) and alive for the process. Station
/// names are not validated against the directory; the caller is trusted.
///
/// Every mutation bumps a revision observable through [`subscribe`];
/// the poller refetches on any revision change.
///
/// [`subscribe`]: SelectionState::subscribe
pub struct SelectionState {
    inner: Mutex<Selection>,
    store: Arc<dyn KeyValueStore>,
    revision: watch::Sender<u64>,
}

impl SelectionState {
    /// Load the selection from the store, defaulting absent fields.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let line = match store.get(KEY_ROUTE) {
            Some(id) => Line::parse(&id).unwrap_or_else(|e| {
                warn!(error = %e, "stored route id is invalid, using default");
                Line::Red
            }),
            None => Line::Red,
        };

        let station = store
            .get(KEY_STATION)
            .unwrap_or_else(|| DEFAULT_STATION.to_string());

        let coordinate = match store.get(KEY_LOCATION) {
            Some(s) => Coordinate::parse(&s).unwrap_or_else(|e| {
                warn!(error = %e, "stored location is invalid, using default");
                default_coordinate()
            }),
            None => default_coordinate(),
        };

        let (revision, _) = watch::channel(0);

        Self {
            inner: Mutex::new(Selection {
                line,
                station,
                coordinate,
            }),
            store,
            revision,
        }
    }

    /// The current selection.
    pub fn snapshot(&self) -> Selection {
        self.inner.lock().unwrap().clone()
    }

    /// Select a line. Persisted under `selectedRoute`.
    pub fn set_line(&self, line: Line) {
        self.inner.lock().unwrap().line = line;
        self.persist(KEY_ROUTE, line.id());
        self.bump();
    }

    /// Select a station by display name. Persisted under `selectedStation`.
    pub fn set_station(&self, station: &str) {
        self.inner.lock().unwrap().station = station.to_string();
        self.persist(KEY_STATION, station);
        self.bump();
    }

    /// Record the last known coordinate. Persisted under `location`.
    pub fn set_coordinate(&self, coordinate: Coordinate) {
        self.inner.lock().unwrap().coordinate = coordinate;
        self.persist(KEY_LOCATION, &coordinate.to_string());
        self.bump();
    }

    /// Subscribe to selection revisions.
    ///
    /// The receiver is marked changed on every mutation of line, station,
    /// or coordinate.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Persist one field; a storage failure keeps the in-memory value.
    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "failed to persist selection");
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
