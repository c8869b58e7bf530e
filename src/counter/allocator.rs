//! CounterAllocator - hands out sequence values for new short IDs.

use tracing::debug;

use super::{check_sequence, CounterError, CounterStore};

/// Allocates the next value of a named sequence.
///
/// Values are unique and strictly increasing per sequence. A value handed out
/// for a creation that later fails is never reissued; the sequence simply
/// has a gap.
#[derive(Clone)]
pub struct CounterAllocator<C> {
    store: C,
}

impl<C: CounterStore> CounterAllocator<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// Atomically increment `sequence` and return the new value.
    pub fn allocate(&self, sequence: &str) -> Result<u64, CounterError> {
        check_sequence(sequence)?;
        let value = self.store.increment(sequence)?;
        debug!(sequence, value, "allocated sequence value");
        Ok(value)
    }

    pub fn store(&self) -> &C {
        &self.store
    }
}
