//! Board-level configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the dashboard wiring.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Base URL of the metro backend.
    pub base_url: String,

    /// Seconds between polls while the selection is unchanged.
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Path of the JSON selection store.
    pub store_path: PathBuf,
}

impl BoardConfig {
    /// Set a custom backend base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the selection store path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the quiet-period poll interval.
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.yupooooo.me".to_string(),
            poll_interval_secs: 100,
            request_timeout_secs: 10,
            store_path: PathBuf::from("metro-board.json"),
        }
    }
}
