//! Domain types for the arrival board.
//!
//! The line identifier and the coordinate both have a fixed string form
//! used for durable storage and for the remote API; parsing enforces that
//! form at construction time.

mod coordinate;
mod line;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use line::{ALL_LINES, InvalidLine, Line};
