//! The in-memory arrival board.
//!
//! Holds the entry list the presentation layer renders. Updates are gated
//! by request-initiation order: each fetch takes a sequence number from
//! [`begin`] before it starts, and [`apply`] ignores any response whose
//! sequence is older than the last one applied. A slow response for a
//! previously selected station can therefore never clobber fresher data.
//!
//! [`begin`]: ArrivalBoard::begin
//! [`apply`]: ArrivalBoard::apply

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::ArrivalEntry;

#[derive(Default)]
struct Inner {
    entries: Vec<ArrivalEntry>,
    applied_seq: u64,
}

/// Current arrival entries, replaced atomically on each successful poll.
#[derive(Default)]
pub struct ArrivalBoard {
    inner: Mutex<Inner>,
    next_seq: AtomicU64,
}

impl ArrivalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a sequence number for a fetch that is about to start.
    pub fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a successful response.
    ///
    /// Replaces the board only if `seq` is newer than the last applied
    /// request; returns whether the entries were taken. The board is
    /// replaced wholesale — entries keep the server's order.
    pub fn apply(&self, seq: u64, entries: Vec<ArrivalEntry>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if seq <= inner.applied_seq {
            return false;
        }
        inner.entries = entries;
        inner.applied_seq = seq;
        true
    }

    /// The entries currently on the board, in server order.
    pub fn entries(&self) -> Vec<ArrivalEntry> {
        self.inner.lock().unwrap().entries.clone()
    }
}
