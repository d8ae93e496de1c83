//! The poll loop that keeps the arrival board current.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::selection::SelectionState;

use super::ArrivalSource;
use super::board::ArrivalBoard;

/// Drives fetches against an [`ArrivalSource`] for the selected station.
///
/// Polls happen:
/// - once when [`run`] starts,
/// - once immediately on every selection revision (line, station, or
///   coordinate change),
/// - on a recurring interval while the selection stays unchanged.
///
/// A failed fetch logs and leaves the board untouched. An empty station
/// name skips the request entirely.
///
/// [`run`]: Poller::run
pub struct Poller<S> {
    source: S,
    selection: Arc<SelectionState>,
    board: Arc<ArrivalBoard>,
    interval: Duration,
}

impl<S: ArrivalSource> Poller<S> {
    pub fn new(
        source: S,
        selection: Arc<SelectionState>,
        board: Arc<ArrivalBoard>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            selection,
            board,
            interval,
        }
    }

    /// Fetch once for the currently selected station.
    pub async fn poll_once(&self) {
        let station = self.selection.snapshot().station;
        if station.is_empty() {
            return;
        }

        let seq = self.board.begin();
        match self.source.fetch(&station).await {
            Ok(entries) => {
                let count = entries.len();
                if self.board.apply(seq, entries) {
                    debug!(station = %station, entries = count, "updated arrival board");
                } else {
                    debug!(station = %station, "discarded superseded arrival response");
                }
            }
            Err(e) => {
                warn!(station = %station, error = %e, "arrival fetch failed, keeping previous board");
            }
        }
    }

    /// Run the poll loop until the selection state is dropped.
    pub async fn run(&self) {
        let mut revisions = self.selection.subscribe();

        self.poll_once().await;

        let mut tick = tokio::time::interval(self.interval);
        tick.tick().await; // first tick fires immediately, already polled

        loop {
            tokio::select! {
                _ = tick.tick() => self.poll_once().await,
                changed = revisions.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    self.poll_once().await;
                    // restart the quiet-period timer from this poll
                    tick.reset();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::arrivals::{ApiError, ArrivalEntry};
    use crate::selection::{KeyValueStore, MemoryStore};

    fn entry(destination: &str) -> ArrivalEntry {
        ArrivalEntry {
            destination: destination.to_string(),
            countdown: "列車進站".to_string(),
            train_number: "777".to_string(),
        }
    }

    /// Test source: canned responses per station, with optional per-station
    /// latency, recording every requested station name.
    struct RecordingSource {
        responses: HashMap<String, Vec<ArrivalEntry>>,
        delays: HashMap<String, Duration>,
        requests: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(station, dest)| (station.to_string(), vec![entry(dest)]))
                    .collect(),
                delays: HashMap::new(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, station: &str, delay: Duration) -> Self {
            self.delays.insert(station.to_string(), delay);
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ArrivalSource for RecordingSource {
        async fn fetch(&self, station: &str) -> Result<Vec<ArrivalEntry>, ApiError> {
            self.requests.lock().unwrap().push(station.to_string());
            if let Some(delay) = self.delays.get(station) {
                tokio::time::sleep(*delay).await;
            }
            self.responses
                .get(station)
                .cloned()
                .ok_or_else(|| ApiError::Api {
                    status: 404,
                    message: format!("no data for {station}"),
                })
        }
    }

    fn poller_for(
        source: RecordingSource,
        store: Arc<MemoryStore>,
    ) -> (Arc<Poller<RecordingSource>>, Arc<SelectionState>, Arc<ArrivalBoard>) {
        let selection = Arc::new(SelectionState::load(store));
        let board = Arc::new(ArrivalBoard::new());
        let poller = Arc::new(Poller::new(
            source,
            selection.clone(),
            board.clone(),
            Duration::from_secs(100),
        ));
        (poller, selection, board)
    }

    #[tokio::test]
    async fn initial_poll_fetches_the_persisted_station_once() {
        let store = Arc::new(MemoryStore::new());
        store.set("selectedStation", "台北車站").unwrap();

        let source = RecordingSource::new(&[("台北車站", "淡水")]);
        let (poller, _selection, board) = poller_for(source, store);

        poller.poll_once().await;

        assert_eq!(poller.source.requests(), vec!["台北車站"]);
        let entries = board.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].destination, "淡水");
    }

    #[tokio::test]
    async fn empty_station_issues_no_request() {
        let store = Arc::new(MemoryStore::new());
        let source = RecordingSource::new(&[]);
        let (poller, selection, _board) = poller_for(source, store);

        selection.set_station("");
        poller.poll_once().await;

        assert!(poller.source.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_entries() {
        let store = Arc::new(MemoryStore::new());
        store.set("selectedStation", "台北車站").unwrap();

        // No response configured for the second station.
        let source = RecordingSource::new(&[("台北車站", "淡水")]);
        let (poller, selection, board) = poller_for(source, store);

        poller.poll_once().await;
        assert_eq!(board.entries()[0].destination, "淡水");

        selection.set_station("未知的站");
        poller.poll_once().await;

        // Board still shows the last good data, unchanged.
        let entries = board.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].destination, "淡水");
    }

    #[tokio::test]
    async fn slow_stale_response_does_not_clobber_newer_station() {
        // The fetch for the previously selected station completes after
        // the fetch for the new one, and must be discarded.
        let store = Arc::new(MemoryStore::new());
        store.set("selectedStation", "台北車站").unwrap();

        let source = RecordingSource::new(&[("台北車站", "淡水"), ("市政府", "頂埔")])
            .with_delay("台北車站", Duration::from_millis(80));
        let (poller, selection, board) = poller_for(source, store);

        let slow = tokio::spawn({
            let poller = poller.clone();
            async move { poller.poll_once().await }
        });

        // Let the slow fetch start before switching stations.
        tokio::time::sleep(Duration::from_millis(10)).await;
        selection.set_station("市政府");
        poller.poll_once().await;

        slow.await.unwrap();

        let entries = board.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].destination, "頂埔");
    }

    #[tokio::test]
    async fn run_polls_again_on_selection_change() {
        let store = Arc::new(MemoryStore::new());
        store.set("selectedStation", "台北車站").unwrap();

        let source = RecordingSource::new(&[("台北車站", "淡水"), ("市政府", "頂埔")]);
        let (poller, selection, board) = poller_for(source, store);

        let loop_handle = tokio::spawn({
            let poller = poller.clone();
            async move { poller.run().await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(poller.source.requests(), vec!["台北車站"]);

        selection.set_station("市政府");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(poller.source.requests(), vec!["台北車站", "市政府"]);
        assert_eq!(board.entries()[0].destination, "頂埔");

        loop_handle.abort();
    }
}
