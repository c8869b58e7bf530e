//! Documents - typed records grouped into named collections.
//!
//! A `Document` is any serde type with a collection name and a primary key.
//! Collections may declare unique keys (the short ID, an e-mail address); the
//! store rejects inserts and updates that would duplicate one.
//!
//! ## Example
//!
//! ```ignore
//! use retail_ids::{Document, DocumentStore, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone, Document)]
//! #[document(collection = "branches")]
//! struct Branch {
//!     id: String,
//!     #[document(unique)]
//!     branch_short_id: Option<String>,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.insert(&branch)?;
//! let loaded = store.find_unique::<Branch>("branch_short_id", "PAI001")?;
//! ```

mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored in a document collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g. "branches", "counters").
    const COLLECTION: &'static str;

    /// Returns the primary key of this document.
    fn id(&self) -> &str;

    /// Unique keys carried by this document as `(field, value)` pairs.
    ///
    /// No two documents of one collection may share a pair.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Field types usable with `#[document(unique)]`.
pub trait UniqueValue {
    /// The indexed value, or `None` when the field is unset.
    fn unique_value(&self) -> Option<&str>;
}

impl UniqueValue for String {
    fn unique_value(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self.as_str())
    }
}

impl UniqueValue for Option<String> {
    fn unique_value(&self) -> Option<&str> {
        self.as_ref().and_then(|value| value.unique_value())
    }
}

/// A versioned wrapper around document data for optimistic concurrency control.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// A unique key is already taken by another document.
    #[error("duplicate {field} {value:?} in {collection}")]
    Duplicate {
        collection: String,
        field: String,
        value: String,
    },
    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("document storage error: {0}")]
    Storage(String),
    /// Document not found.
    #[error("document not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

/// Mint a fresh primary key.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub use in_memory::InMemoryDocumentStore;
pub use store::DocumentStore;
