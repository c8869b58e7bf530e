//! Counters - named, monotonically non-decreasing sequences.
//!
//! One counter per entity type (`branchCounter`, `customerCounter`, ...).
//! Counters are created lazily, move only through an atomic increment or a
//! set-if-greater raise, and are never deleted.
//!
//! ## Example
//!
//! ```ignore
//! use retail_ids::{CounterAllocator, InMemoryCounterStore};
//!
//! let allocator = CounterAllocator::new(InMemoryCounterStore::new());
//! assert_eq!(allocator.allocate("productCounter")?, 1);
//! assert_eq!(allocator.allocate("productCounter")?, 2);
//! ```

mod allocator;
mod document_store;
mod in_memory;
mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, DocumentError};

/// Persisted counter row: `{ name, value }`, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRow {
    pub name: String,
    #[serde(default)]
    pub value: u64,
}

impl Document for CounterRow {
    const COLLECTION: &'static str = "counters";

    fn id(&self) -> &str {
        &self.name
    }
}

/// Error type for counter operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error("sequence name must not be empty")]
    EmptySequence,
    #[error("counter {sequence} cannot advance past u64::MAX")]
    Overflow { sequence: String },
    #[error("counter storage failed: {0}")]
    Storage(#[from] DocumentError),
}

pub(crate) fn check_sequence(sequence: &str) -> Result<(), CounterError> {
    if sequence.is_empty() {
        Err(CounterError::EmptySequence)
    } else {
        Ok(())
    }
}

pub use allocator::CounterAllocator;
pub use document_store::DocumentCounterStore;
pub use in_memory::InMemoryCounterStore;
pub use store::CounterStore;
