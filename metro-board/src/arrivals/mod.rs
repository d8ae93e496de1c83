//! Live arrival data: client, board, and poll loop.
//!
//! The remote endpoint returns the next trains for a station as a JSON
//! array; the poller keeps an [`ArrivalBoard`] current by refetching on
//! selection changes and on a recurring timer. A failed fetch never
//! clears the board — stale data stays visible until a fetch succeeds.

mod board;
mod client;
mod error;
mod mock;
mod poller;
mod types;

use std::future::Future;

pub use board::ArrivalBoard;
pub use client::{MetroClient, MetroClientConfig, backend_station_id};
pub use error::ApiError;
pub use mock::MockArrivalSource;
pub use poller::Poller;
pub use types::ArrivalEntry;

/// A source of arrival data for a station, by display name.
///
/// Implemented by [`MetroClient`] for the real endpoint and by
/// [`MockArrivalSource`] for fixture-backed tests.
pub trait ArrivalSource: Send + Sync {
    fn fetch(
        &self,
        station: &str,
    ) -> impl Future<Output = Result<Vec<ArrivalEntry>, ApiError>> + Send;
}
