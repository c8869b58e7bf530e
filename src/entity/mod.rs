//! Entities with short IDs and the save hook that assigns them.
//!
//! Every entity type that carries a short ID implements `ShortIdentified`,
//! naming its counter sequence and its `ShortIdFormat`. Creation runs an
//! explicit pipeline in `EntityRepository::create`:
//!
//! 1. fill the primary key if missing
//! 2. `before_save` (entity business rules)
//! 3. `assign_short_id` (allocate + format, only if unset)
//! 4. stamp timestamps and insert in one write
//!
//! ## Example
//!
//! ```ignore
//! let repo = EntityRepository::new(
//!     InMemoryDocumentStore::new(),
//!     CounterAllocator::new(InMemoryCounterStore::new()),
//!     Arc::new(SystemClock),
//! );
//! let product = repo.create(Product::new("Stapler"))?;
//! assert_eq!(product.data.product_short_id.as_deref(), Some("PROD-0001"));
//! ```

mod repository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::clock::Clock;
use crate::counter::{CounterAllocator, CounterError, CounterStore};
use crate::document::{Document, DocumentError};
use crate::short_id::ShortIdFormat;

pub use repository::EntityRepository;

/// Creation and modification times, maintained by `EntityRepository`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A document type whose records carry a human-readable short ID.
pub trait ShortIdentified: Document {
    /// Counter sequence shared by every record of this type.
    const SEQUENCE: &'static str;
    /// Short-ID scheme of this type.
    const FORMAT: ShortIdFormat;
    /// Serialized name of the short-ID field.
    const SHORT_ID_FIELD: &'static str;
    /// Unique key the short ID is indexed under (the Rust field name).
    const SHORT_ID_KEY: &'static str;

    fn short_id(&self) -> Option<&str>;

    fn set_short_id(&mut self, short_id: String);

    fn set_id(&mut self, id: String);

    fn timestamps_mut(&mut self) -> &mut Timestamps;

    /// Entity business rules re-applied on every save. `now` is the save time.
    fn before_save(&mut self, _now: DateTime<Utc>) {}
}

/// Error type for entity persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("short id allocation failed: {0}")]
    Allocation(#[from] CounterError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("short id of {collection}:{id} cannot change once assigned")]
    ShortIdImmutable { collection: String, id: String },
    #[error("no {collection} with short id {short_id}")]
    NotFound {
        collection: &'static str,
        short_id: String,
    },
    #[error("{0}")]
    Rejected(String),
}

/// Give `entity` a short ID if it has none.
///
/// Allocates the next value of `M::SEQUENCE` and formats it with `M::FORMAT`,
/// taking the year from `clock`. An entity that already carries a short ID is
/// left untouched and nothing is allocated. Returns the allocated value.
pub fn assign_short_id<M, C>(
    entity: &mut M,
    allocator: &CounterAllocator<C>,
    clock: &dyn Clock,
) -> Result<Option<u64>, CounterError>
where
    M: ShortIdentified,
    C: CounterStore,
{
    if entity.short_id().is_some_and(|short_id| !short_id.is_empty()) {
        return Ok(None);
    }

    let value = allocator.allocate(M::SEQUENCE)?;
    let short_id = M::FORMAT.format(value, clock.year());
    debug!(collection = M::COLLECTION, %short_id, "assigned short id");
    entity.set_short_id(short_id);
    Ok(Some(value))
}
