//! The user's current selection and its durable storage.
//!
//! The selection (line, station, coordinate) is loaded once at startup,
//! persisted synchronously on every mutation, and lives for the process.

mod state;
mod store;

pub use state::{Selection, SelectionState};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
