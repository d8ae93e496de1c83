//! Geolocation bridge: device position → nearest station → selection.
//!
//! A one-shot position request (bounded by a 5 s timeout) is forwarded to
//! the backend's nearest-station endpoint; the result updates the
//! selection's coordinate, station, and — via the directory — line.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::arrivals::{ApiError, MetroClient};
use crate::directory::StationDirectory;
use crate::domain::Coordinate;
use crate::selection::SelectionState;

/// How long to wait for a device position.
const POSITION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the device-position side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The user refused the permission prompt
    #[error("location permission denied")]
    Denied,

    /// The platform has no positioning capability
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    /// The platform failed to produce a fix
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Errors from a locate attempt.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// No position within the timeout
    #[error("timed out waiting for a device position")]
    Timeout,

    #[error(transparent)]
    Position(#[from] PositionError),

    /// The nearest-station endpoint failed
    #[error("nearest-station lookup failed: {0}")]
    Lookup(#[from] ApiError),
}

/// A source of one-shot device positions.
pub trait PositionSource: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// Position source for platforms without positioning.
///
/// The headless dashboard binary has no device to ask.
pub struct UnsupportedPositionSource;

impl PositionSource for UnsupportedPositionSource {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        Err(PositionError::Unsupported)
    }
}

/// Resolves a coordinate to the nearest station's display name.
pub trait StationLocator: Send + Sync {
    fn nearest_station(
        &self,
        coordinate: &Coordinate,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;
}

impl StationLocator for MetroClient {
    async fn nearest_station(&self, coordinate: &Coordinate) -> Result<String, ApiError> {
        MetroClient::nearest_station(self, coordinate).await
    }
}

/// Feeds geolocation results into the selection state.
pub struct GeoBridge<L> {
    locator: L,
    directory: Arc<StationDirectory>,
    selection: Arc<SelectionState>,
    position_timeout: Duration,
}

impl<L: StationLocator> GeoBridge<L> {
    pub fn new(
        locator: L,
        directory: Arc<StationDirectory>,
        selection: Arc<SelectionState>,
    ) -> Self {
        Self {
            locator,
            directory,
            selection,
            position_timeout: POSITION_TIMEOUT,
        }
    }

    /// Set a custom position timeout (for testing).
    pub fn with_position_timeout(mut self, timeout: Duration) -> Self {
        self.position_timeout = timeout;
        self
    }

    /// Resolve the device position to a station and select it.
    ///
    /// On success the coordinate, station, and line are all updated and
    /// the station name is returned. The coordinate is stored as soon as
    /// a fix arrives, so a later lookup failure leaves station and line
    /// unchanged but keeps the coordinate. A station the directory cannot
    /// resolve still gets selected; the line is left as it was.
    pub async fn locate<P: PositionSource>(&self, source: &P) -> Result<String, GeoError> {
        let coordinate = tokio::time::timeout(self.position_timeout, source.current_position())
            .await
            .map_err(|_| GeoError::Timeout)??;

        debug!(coordinate = %coordinate, "obtained device position");
        self.selection.set_coordinate(coordinate);

        let station = self.locator.nearest_station(&coordinate).await?;
        self.selection.set_station(&station);

        match self.directory.resolve(&station) {
            Some(line) => self.selection.set_line(line),
            None => {
                warn!(station = %station, "nearest station is not in the directory, keeping current line");
            }
        }

        Ok(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::Line;
    use crate::selection::MemoryStore;

    struct StubPosition(Result<Coordinate, PositionError>);

    impl PositionSource for StubPosition {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            self.0.clone()
        }
    }

    /// Never produces a fix; used to exercise the timeout.
    struct SilentPosition;

    impl PositionSource for SilentPosition {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            std::future::pending().await
        }
    }

    /// Locator stub recording the coordinate it was asked about.
    struct StubLocator {
        result: Result<String, ()>,
        asked: Mutex<Option<Coordinate>>,
    }

    impl StubLocator {
        fn returning(station: &str) -> Self {
            Self {
                result: Ok(station.to_string()),
                asked: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(()),
                asked: Mutex::new(None),
            }
        }
    }

    impl StationLocator for StubLocator {
        async fn nearest_station(&self, coordinate: &Coordinate) -> Result<String, ApiError> {
            *self.asked.lock().unwrap() = Some(*coordinate);
            match &self.result {
                Ok(station) => Ok(station.clone()),
                Err(()) => Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn bridge(locator: StubLocator) -> (GeoBridge<StubLocator>, Arc<SelectionState>) {
        let selection = Arc::new(SelectionState::load(Arc::new(MemoryStore::new())));
        let bridge = GeoBridge::new(
            locator,
            Arc::new(StationDirectory::taipei()),
            selection.clone(),
        );
        (bridge, selection)
    }

    fn position(lat: f64, lon: f64) -> StubPosition {
        StubPosition(Ok(Coordinate::new(lat, lon).unwrap()))
    }

    #[tokio::test]
    async fn success_selects_station_line_and_coordinate() {
        let (bridge, selection) = bridge(StubLocator::returning("市政府"));

        let station = bridge.locate(&position(25.05, 121.52)).await.unwrap();

        assert_eq!(station, "市政府");
        let s = selection.snapshot();
        assert_eq!(s.station, "市政府");
        assert_eq!(s.line, Line::Blue);
        assert_eq!(s.coordinate.to_string(), "25.05,121.52");
    }

    #[tokio::test]
    async fn lookup_receives_the_fresh_coordinate() {
        // The lookup must see the fix obtained in this call, never a
        // previously stored coordinate.
        let (bridge, _selection) = bridge(StubLocator::returning("市政府"));

        bridge.locate(&position(25.05, 121.52)).await.unwrap();

        let asked = bridge.locator.asked.lock().unwrap().unwrap();
        assert_eq!(asked.to_string(), "25.05,121.52");
    }

    #[tokio::test]
    async fn denied_leaves_selection_unchanged() {
        let (bridge, selection) = bridge(StubLocator::returning("市政府"));
        let before = selection.snapshot();

        let err = bridge
            .locate(&StubPosition(Err(PositionError::Denied)))
            .await
            .unwrap_err();

        assert!(matches!(err, GeoError::Position(PositionError::Denied)));
        assert_eq!(selection.snapshot(), before);
    }

    #[tokio::test]
    async fn unsupported_platform_is_surfaced() {
        let (bridge, _selection) = bridge(StubLocator::returning("市政府"));

        let err = bridge.locate(&UnsupportedPositionSource).await.unwrap_err();
        assert!(matches!(
            err,
            GeoError::Position(PositionError::Unsupported)
        ));
    }

    #[tokio::test]
    async fn slow_position_times_out() {
        let (bridge, selection) = bridge(StubLocator::returning("市政府"));
        let bridge = bridge.with_position_timeout(Duration::from_millis(20));
        let before = selection.snapshot();

        let err = bridge.locate(&SilentPosition).await.unwrap_err();

        assert!(matches!(err, GeoError::Timeout));
        assert_eq!(selection.snapshot(), before);
    }

    #[tokio::test]
    async fn lookup_failure_keeps_station_and_line() {
        let (bridge, selection) = bridge(StubLocator::failing());
        let before = selection.snapshot();

        let err = bridge.locate(&position(25.05, 121.52)).await.unwrap_err();

        assert!(matches!(err, GeoError::Lookup(_)));
        let s = selection.snapshot();
        assert_eq!(s.station, before.station);
        assert_eq!(s.line, before.line);
        // The fix itself was stored before the lookup.
        assert_eq!(s.coordinate.to_string(), "25.05,121.52");
    }

    #[tokio::test]
    async fn unresolved_station_is_selected_but_line_is_kept() {
        let (bridge, selection) = bridge(StubLocator::returning("機場第一航廈"));
        let line_before = selection.snapshot().line;

        let station = bridge.locate(&position(25.08, 121.23)).await.unwrap();

        assert_eq!(station, "機場第一航廈");
        let s = selection.snapshot();
        assert_eq!(s.station, "機場第一航廈");
        assert_eq!(s.line, line_before);
    }
}
