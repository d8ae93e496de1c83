//! Mock arrival source for development and tests without the backend.
//!
//! Loads canned arrival lists from JSON files and serves them as if they
//! were live responses.

use std::collections::HashMap;
use std::path::Path;

use super::ArrivalSource;
use super::client::backend_station_id;
use super::error::ApiError;
use super::types::ArrivalEntry;

/// Arrival source backed by fixture files.
///
/// Expects files named `{station}.json`, each a JSON array of entries in
/// the backend's wire format. Files are keyed by backend identifier, not
/// display name — the display string 台北101/世貿 contains a `/` and
/// cannot be a filename, so its fixture lives at `101.json`.
#[derive(Clone)]
pub struct MockArrivalSource {
    boards: HashMap<String, Vec<ArrivalEntry>>,
}

impl MockArrivalSource {
    /// Load all `.json` fixtures from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| ApiError::Api {
            status: 0,
            message: format!("failed to read fixture directory {data_dir:?}: {e}"),
        })?;

        for dir_entry in entries {
            let dir_entry = dir_entry.map_err(|e| ApiError::Api {
                status: 0,
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = dir_entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let station = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| ApiError::Api {
                    status: 0,
                    message: format!("invalid fixture filename: {path:?}"),
                })?
                .to_string();

            let json = std::fs::read_to_string(&path).map_err(|e| ApiError::Api {
                status: 0,
                message: format!("failed to read {path:?}: {e}"),
            })?;

            let board: Vec<ArrivalEntry> =
                serde_json::from_str(&json).map_err(|e| ApiError::Json {
                    message: format!("failed to parse {path:?}: {e}"),
                })?;

            boards.insert(station, board);
        }

        if boards.is_empty() {
            return Err(ApiError::Api {
                status: 0,
                message: format!("no fixture files found in {data_dir:?}"),
            });
        }

        Ok(Self { boards })
    }

    /// Stations (backend ids) with fixture data.
    pub fn available_stations(&self) -> Vec<&str> {
        self.boards.keys().map(String::as_str).collect()
    }
}

impl ArrivalSource for MockArrivalSource {
    async fn fetch(&self, station: &str) -> Result<Vec<ArrivalEntry>, ApiError> {
        self.boards
            .get(backend_station_id(station))
            .cloned()
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: format!("no fixture data for station {station}"),
            })
    }
}
