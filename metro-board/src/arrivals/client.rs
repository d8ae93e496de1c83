//! Metro backend HTTP client.
//!
//! Two endpoints on one host:
//! - `GET /api/metro/{station}` — arrival entries for a station.
//! - `GET /api/location/{lat,lon}` — name of the nearest station.
//!
//! Station names are display strings (non-ASCII, and one contains a `/`),
//! so path segments are always percent-encoded.

use tracing::debug;

use crate::domain::Coordinate;

use super::error::ApiError;
use super::types::ArrivalEntry;
use super::ArrivalSource;

/// Default base URL for the metro backend.
const DEFAULT_BASE_URL: &str = "https://api.yupooooo.me";

/// Default request timeout in seconds.
///
/// An explicit bound keeps a hung request from pinning the poller.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Display name → backend identifier remaps.
///
/// The backend predates some display strings; today the only mismatch is
/// 台北101/世貿, which it knows as `101`. The table stays extensible for
/// the next mismatch.
const STATION_ALIASES: &[(&str, &str)] = &[("台北101/世貿", "101")];

/// The identifier the backend expects for a display name.
///
/// Returns the name unchanged when no remap applies.
pub fn backend_station_id(station: &str) -> &str {
    STATION_ALIASES
        .iter()
        .find(|(display, _)| *display == station)
        .map(|(_, id)| *id)
        .unwrap_or(station)
}

/// Configuration for the metro client.
#[derive(Debug, Clone)]
pub struct MetroClientConfig {
    /// Base URL for the backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MetroClientConfig {
    /// Create a config with the production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a mirror).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MetroClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the metro backend.
#[derive(Debug, Clone)]
pub struct MetroClient {
    http: reqwest::Client,
    base_url: String,
}

fn arrival_url(base_url: &str, station: &str) -> String {
    format!(
        "{}/api/metro/{}",
        base_url,
        urlencoding::encode(backend_station_id(station))
    )
}

fn location_url(base_url: &str, coordinate: &Coordinate) -> String {
    format!(
        "{}/api/location/{}",
        base_url,
        urlencoding::encode(&coordinate.to_string())
    )
}

impl MetroClient {
    /// Create a new client.
    pub fn new(config: MetroClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the arrival entries for a station, in server order.
    pub async fn arrivals(&self, station: &str) -> Result<Vec<ArrivalEntry>, ApiError> {
        let url = arrival_url(&self.base_url, station);
        debug!(url = %url, station = %station, "fetching arrivals");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
        })
    }

    /// Resolve a coordinate to the nearest station's display name.
    pub async fn nearest_station(&self, coordinate: &Coordinate) -> Result<String, ApiError> {
        let url = location_url(&self.base_url, coordinate);
        debug!(url = %url, "resolving nearest station");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        // The endpoint returns a bare JSON string.
        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
        })
    }
}

impl ArrivalSource for MetroClient {
    async fn fetch(&self, station: &str) -> Result<Vec<ArrivalEntry>, ApiError> {
        self.arrivals(station).await
    }
}
