//! Human-readable short IDs for retail microservices.
//!
//! Each entity type (branch, customer, order, product) owns a named counter.
//! Creating an entity allocates the next counter value atomically and formats
//! it into a short ID such as `PAI007`, `2024CUST00001`, `ORD-0001` or
//! `PROD-0001`. At startup, `sync` raises every counter to the highest value
//! already present in its collection so drift can never produce duplicates.

extern crate self as retail_ids;

pub mod app;
pub mod clock;
pub mod config;
pub mod counter;
pub mod document;
pub mod entity;
pub mod retail;
pub mod service;
pub mod short_id;
pub mod sync;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError};
pub use counter::{
    CounterAllocator, CounterError, CounterRow, CounterStore, DocumentCounterStore,
    InMemoryCounterStore,
};
pub use document::{
    new_id, Document, DocumentError, DocumentStore, InMemoryDocumentStore, UniqueValue, Versioned,
};
pub use entity::{assign_short_id, EntityError, EntityRepository, ShortIdentified, Timestamps};
pub use short_id::{format_short_id, ShortIdFormat, ShortIdParseError};
pub use sync::{
    run_startup_sync, scan_short_ids, synchronize, ShortIdScan, SyncError, SyncOutcome, SyncPolicy,
};

// Derive macro, same name as the trait (like serde's Serialize).
pub use retail_ids_macros::Document;
