//! InMemoryCounterStore - HashMap-backed counters behind a single write lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{check_sequence, CounterError, CounterStore};
use crate::document::DocumentError;

/// In-memory counter store. Clone-friendly via Arc; clones share counters.
#[derive(Clone, Default)]
pub struct InMemoryCounterStore {
    counters: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `step` to the current value (0 when absent) under the write lock.
    fn modify(
        &self,
        sequence: &str,
        step: impl FnOnce(u64) -> Result<u64, CounterError>,
    ) -> Result<u64, CounterError> {
        check_sequence(sequence)?;
        let mut counters = self
            .counters
            .write()
            .map_err(|_| CounterError::Storage(DocumentError::Storage("lock poisoned".into())))?;
        let value = counters.entry(sequence.to_string()).or_insert(0);
        *value = step(*value)?;
        Ok(*value)
    }
}

impl CounterStore for InMemoryCounterStore {
    fn increment(&self, sequence: &str) -> Result<u64, CounterError> {
        self.modify(sequence, |value| {
            value.checked_add(1).ok_or_else(|| CounterError::Overflow {
                sequence: sequence.to_string(),
            })
        })
    }

    fn raise(&self, sequence: &str, floor: u64) -> Result<u64, CounterError> {
        self.modify(sequence, |value| Ok(value.max(floor)))
    }

    fn current(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        check_sequence(sequence)?;
        let counters = self
            .counters
            .read()
            .map_err(|_| CounterError::Storage(DocumentError::Storage("lock poisoned".into())))?;
        Ok(counters.get(sequence).copied())
    }
}
