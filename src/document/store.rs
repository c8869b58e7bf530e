//! DocumentStore - Abstract storage for document collections.

use super::{Document, DocumentError, Versioned};

/// Abstract storage for document collections.
///
/// Every write is atomic with its checks: version comparison and unique-key
/// enforcement happen under the same critical section as the write itself.
pub trait DocumentStore: Send + Sync {
    /// Get a document by primary key. Returns None if not found.
    fn get<D: Document>(&self, id: &str) -> Result<Option<Versioned<D>>, DocumentError>;

    /// Insert a new document at version 1.
    ///
    /// Fails with `ConcurrencyConflict` if the primary key exists and with
    /// `Duplicate` if a unique key is already taken.
    fn insert<D: Document>(&self, document: &D) -> Result<Versioned<D>, DocumentError>;

    /// Replace an existing document if its stored version equals `expected_version`.
    fn update<D: Document>(
        &self,
        document: &D,
        expected_version: u64,
    ) -> Result<Versioned<D>, DocumentError>;

    /// Atomically read, change and write back the document keyed `id`.
    ///
    /// `change` sees the stored document, or `None` if there is none, and
    /// returns the document to write (inserted at version 1 or written at the
    /// next version) or `None` to leave the store untouched. No other write to
    /// the collection can interleave. Returns the document as stored afterwards.
    fn modify<D, E, F>(&self, id: &str, change: F) -> Result<Option<Versioned<D>>, E>
    where
        D: Document,
        E: From<DocumentError>,
        F: FnOnce(Option<&D>) -> Result<Option<D>, E>;

    /// Delete a document by primary key. Returns true if it existed.
    fn delete<D: Document>(&self, id: &str) -> Result<bool, DocumentError>;

    /// Find documents matching a predicate, in insertion order.
    fn find<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, DocumentError>;

    /// Find the first document (in insertion order) matching a predicate.
    fn find_one<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<Versioned<D>>, DocumentError> {
        Ok(self.find(predicate)?.into_iter().next())
    }

    /// The document whose unique key `field` holds `value`.
    fn find_unique<D: Document>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Versioned<D>>, DocumentError> {
        self.find_one(&|document: &D| {
            document
                .unique_keys()
                .iter()
                .any(|(key, held)| *key == field && held == value)
        })
    }

    /// Count documents matching a predicate.
    fn count<D: Document>(&self, predicate: &dyn Fn(&D) -> bool) -> Result<usize, DocumentError> {
        Ok(self.find(predicate)?.len())
    }
}
