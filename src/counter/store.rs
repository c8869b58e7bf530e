//! CounterStore - Abstract storage for named counters.

use std::sync::Arc;

use super::CounterError;

/// Durable keyed integer registers.
///
/// Both mutations are single atomic read-modify-writes against the store;
/// implementations must never split them into a read followed by a blind write.
pub trait CounterStore: Send + Sync {
    /// Add one to `sequence` and return the new value.
    ///
    /// An absent counter is created with an implied prior value of 0, so the
    /// first call returns 1.
    fn increment(&self, sequence: &str) -> Result<u64, CounterError>;

    /// Set `sequence` to `max(current, floor)` and return the resulting value.
    ///
    /// An absent counter is created at `floor`. Never lowers a counter.
    fn raise(&self, sequence: &str, floor: u64) -> Result<u64, CounterError>;

    /// Current value, or `None` if the counter has never been written.
    fn current(&self, sequence: &str) -> Result<Option<u64>, CounterError>;
}

impl<C: CounterStore + ?Sized> CounterStore for Arc<C> {
    fn increment(&self, sequence: &str) -> Result<u64, CounterError> {
        (**self).increment(sequence)
    }

    fn raise(&self, sequence: &str, floor: u64) -> Result<u64, CounterError> {
        (**self).raise(sequence, floor)
    }

    fn current(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        (**self).current(sequence)
    }
}
