//! InMemoryDocumentStore - HashMap-backed document store for tests and single-process services.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Document, DocumentError, DocumentStore, Versioned};

/// Internal stored representation of a document.
struct StoredDocument {
    bytes: Vec<u8>,
    version: u64,
    /// Insertion sequence, used to keep `find` results in insertion order.
    seq: u64,
    unique: Vec<(&'static str, String)>,
}

/// One collection: documents by primary key plus the unique-key index.
#[derive(Default)]
struct Collection {
    documents: HashMap<String, StoredDocument>,
    /// field -> value -> primary key
    unique: HashMap<&'static str, HashMap<String, String>>,
}

impl Collection {
    fn owner(&self, field: &str, value: &str) -> Option<&String> {
        self.unique.get(field).and_then(|values| values.get(value))
    }

    /// Reject `keys` if a document other than `id` already holds one of them.
    fn check_unique(
        &self,
        collection: &'static str,
        id: &str,
        keys: &[(&'static str, String)],
    ) -> Result<(), DocumentError> {
        for (field, value) in keys {
            if self.owner(field, value).is_some_and(|owner| owner != id) {
                return Err(DocumentError::Duplicate {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Option<StoredDocument> {
        let stored = self.documents.remove(id)?;
        for (field, value) in &stored.unique {
            if let Some(values) = self.unique.get_mut(field) {
                values.remove(value);
            }
        }
        Some(stored)
    }

    /// Store `stored` under `id`, replacing the previous document and its index entries.
    fn put(&mut self, id: &str, stored: StoredDocument) {
        self.remove(id);
        for (field, value) in &stored.unique {
            self.unique
                .entry(*field)
                .or_default()
                .insert(value.clone(), id.to_string());
        }
        self.documents.insert(id.to_string(), stored);
    }
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    by_name: HashMap<&'static str, Collection>,
}

/// In-memory document store: one map per collection, keyed by primary key.
///
/// Clone-friendly via Arc; clones share the same collections.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, DocumentError> {
        self.state
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, DocumentError> {
        self.state
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))
    }
}

fn encode<D: Document>(document: &D) -> Result<Vec<u8>, DocumentError> {
    serde_json::to_vec(document).map_err(|e| DocumentError::Serde(e.to_string()))
}

fn decode<D: Document>(stored: &StoredDocument) -> Result<Versioned<D>, DocumentError> {
    let data: D =
        serde_json::from_slice(&stored.bytes).map_err(|e| DocumentError::Serde(e.to_string()))?;
    Ok(Versioned {
        data,
        version: stored.version,
    })
}

impl DocumentStore for InMemoryDocumentStore {
    fn get<D: Document>(&self, id: &str) -> Result<Option<Versioned<D>>, DocumentError> {
        let state = self.read()?;
        state
            .by_name
            .get(D::COLLECTION)
            .and_then(|collection| collection.documents.get(id))
            .map(decode::<D>)
            .transpose()
    }

    fn insert<D: Document>(&self, document: &D) -> Result<Versioned<D>, DocumentError> {
        let bytes = encode(document)?;
        let unique = document.unique_keys();

        let mut state = self.write()?;
        let Collections { next_seq, by_name } = &mut *state;
        let collection = by_name.entry(D::COLLECTION).or_default();

        if let Some(existing) = collection.documents.get(document.id()) {
            return Err(DocumentError::ConcurrencyConflict {
                collection: D::COLLECTION.to_string(),
                id: document.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }
        collection.check_unique(D::COLLECTION, document.id(), &unique)?;

        *next_seq += 1;
        collection.put(
            document.id(),
            StoredDocument {
                bytes,
                version: 1,
                seq: *next_seq,
                unique,
            },
        );

        Ok(Versioned {
            data: document.clone(),
            version: 1,
        })
    }

    fn update<D: Document>(
        &self,
        document: &D,
        expected_version: u64,
    ) -> Result<Versioned<D>, DocumentError> {
        let bytes = encode(document)?;
        let unique = document.unique_keys();

        let mut state = self.write()?;
        let not_found = || DocumentError::NotFound {
            collection: D::COLLECTION.to_string(),
            id: document.id().to_string(),
        };
        let collection = state.by_name.get_mut(D::COLLECTION).ok_or_else(not_found)?;
        let (actual_version, seq) = collection
            .documents
            .get(document.id())
            .map(|stored| (stored.version, stored.seq))
            .ok_or_else(not_found)?;

        if actual_version != expected_version {
            return Err(DocumentError::ConcurrencyConflict {
                collection: D::COLLECTION.to_string(),
                id: document.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }
        collection.check_unique(D::COLLECTION, document.id(), &unique)?;

        let new_version = actual_version + 1;
        collection.put(
            document.id(),
            StoredDocument {
                bytes,
                version: new_version,
                seq,
                unique,
            },
        );

        Ok(Versioned {
            data: document.clone(),
            version: new_version,
        })
    }

    fn modify<D, E, F>(&self, id: &str, change: F) -> Result<Option<Versioned<D>>, E>
    where
        D: Document,
        E: From<DocumentError>,
        F: FnOnce(Option<&D>) -> Result<Option<D>, E>,
    {
        let mut state = self.write()?;
        let Collections { next_seq, by_name } = &mut *state;
        let collection = by_name.entry(D::COLLECTION).or_default();

        let stored_seq = collection.documents.get(id).map(|stored| stored.seq);
        let current = collection
            .documents
            .get(id)
            .map(decode::<D>)
            .transpose()?;

        let Some(next) = change(current.as_ref().map(|current| &current.data))? else {
            return Ok(current);
        };
        if next.id() != id {
            return Err(DocumentError::Storage(format!(
                "modify of {}:{id} returned a document keyed {}",
                D::COLLECTION,
                next.id()
            ))
            .into());
        }

        let bytes = encode(&next)?;
        let unique = next.unique_keys();
        collection.check_unique(D::COLLECTION, id, &unique)?;

        let version = current.as_ref().map_or(1, |current| current.version + 1);
        let seq = match stored_seq {
            Some(seq) => seq,
            None => {
                *next_seq += 1;
                *next_seq
            }
        };
        collection.put(
            id,
            StoredDocument {
                bytes,
                version,
                seq,
                unique,
            },
        );

        Ok(Some(Versioned {
            data: next,
            version,
        }))
    }

    fn delete<D: Document>(&self, id: &str) -> Result<bool, DocumentError> {
        let mut state = self.write()?;
        Ok(state
            .by_name
            .get_mut(D::COLLECTION)
            .is_some_and(|collection| collection.remove(id).is_some()))
    }

    fn find<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, DocumentError> {
        let state = self.read()?;
        let Some(collection) = state.by_name.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut ordered: Vec<&StoredDocument> = collection.documents.values().collect();
        ordered.sort_by_key(|stored| stored.seq);

        let mut results = Vec::new();
        for stored in ordered {
            let versioned = decode::<D>(stored)?;
            if predicate(&versioned.data) {
                results.push(versioned);
            }
        }

        Ok(results)
    }

    fn find_unique<D: Document>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Versioned<D>>, DocumentError> {
        let state = self.read()?;
        let Some(collection) = state.by_name.get(D::COLLECTION) else {
            return Ok(None);
        };
        collection
            .owner(field, value)
            .and_then(|id| collection.documents.get(id))
            .map(decode::<D>)
            .transpose()
    }
}
