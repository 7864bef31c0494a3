//! Monotonic identifier counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing identifiers, each exactly once.
///
/// The counter is an owned value: construct one per process (or per test) and
/// share it behind an `Arc`. When paired with the PostgreSQL backend it must be
/// seeded with one past the highest identifier already stored, otherwise a
/// restart would re-mint existing codes.
#[derive(Debug, Default)]
pub struct IdSource {
    next: AtomicU64,
}

impl IdSource {
    /// Creates a counter whose first issued identifier is `start`.
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Returns the current value and advances the counter by one.
    ///
    /// A single `fetch_add` is the whole critical section, so concurrent
    /// callers never observe the same identifier.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The identifier the next call to [`IdSource::next`] will return.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
