//! Arrival response schema.

use serde::{Deserialize, Serialize};

/// Countdown label the backend uses for a train at the platform.
const ARRIVING: &str = "列車進站";

/// One upcoming train at the selected station.
///
/// Field names mirror the backend's JSON exactly. `countdown` is an opaque
/// display string — either a phrase like 列車進站 or a time — and is
/// rendered as-is; nothing in the system parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalEntry {
    #[serde(rename = "DestinationName")]
    pub destination: String,

    #[serde(rename = "CountDown")]
    pub countdown: String,

    #[serde(rename = "TrainNumber")]
    pub train_number: String,
}

impl ArrivalEntry {
    /// Whether the train is at the platform right now.
    pub fn is_arriving(&self) -> bool {
        self.countdown == ARRIVING
    }
}
