//! DocumentCounterStore - counters kept as rows of the `counters` collection.
//!
//! Each mutation is one `DocumentStore::modify` on the counter row: the store
//! reads the row, applies the step and writes the result without any other
//! write in between, creating the row when it is absent. This is the
//! find-and-update-with-upsert a document database offers for `$inc`/`$max`.

use super::{check_sequence, CounterError, CounterRow, CounterStore};
use crate::document::DocumentStore;

/// Counter store over any `DocumentStore`.
#[derive(Clone)]
pub struct DocumentCounterStore<S> {
    documents: S,
}

impl<S: DocumentStore> DocumentCounterStore<S> {
    pub fn new(documents: S) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &S {
        &self.documents
    }

    /// `step` maps the current value (0 when absent) to the next one, or
    /// `None` to leave an existing row untouched. An absent row is always
    /// written, at the stepped value or 0.
    fn modify(
        &self,
        sequence: &str,
        step: impl FnOnce(u64) -> Result<Option<u64>, CounterError>,
    ) -> Result<u64, CounterError> {
        check_sequence(sequence)?;

        let row = self
            .documents
            .modify::<CounterRow, CounterError, _>(sequence, |current| {
                let value = current.map_or(0, |row| row.value);
                let next = match step(value)? {
                    Some(next) => next,
                    None if current.is_some() => return Ok(None),
                    None => value,
                };
                Ok(Some(CounterRow {
                    name: sequence.to_string(),
                    value: next,
                }))
            })?;
        Ok(row.map_or(0, |row| row.data.value))
    }
}

impl<S: DocumentStore> CounterStore for DocumentCounterStore<S> {
    fn increment(&self, sequence: &str) -> Result<u64, CounterError> {
        self.modify(sequence, |value| {
            value
                .checked_add(1)
                .map(Some)
                .ok_or_else(|| CounterError::Overflow {
                    sequence: sequence.to_string(),
                })
        })
    }

    fn raise(&self, sequence: &str, floor: u64) -> Result<u64, CounterError> {
        self.modify(sequence, |value| Ok((floor > value).then_some(floor)))
    }

    fn current(&self, sequence: &str) -> Result<Option<u64>, CounterError> {
        check_sequence(sequence)?;
        Ok(self
            .documents
            .get::<CounterRow>(sequence)?
            .map(|row| row.data.value))
    }
}
