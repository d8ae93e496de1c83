//! Taipei Metro arrival board.
//!
//! The logic behind a live arrival-countdown dashboard: a station
//! directory, persisted line/station/coordinate selection, a poller for
//! the remote arrival endpoint, and a bridge from a device coordinate to
//! the nearest station.

pub mod arrivals;
pub mod config;
pub mod directory;
pub mod domain;
pub mod geo;
pub mod selection;
