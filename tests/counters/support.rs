//! Shared fixtures: a retail repository pinned to 2024 and direct-insert seeding.

use std::sync::Arc;

use retail_ids::app::{self, RetailRepository};
use retail_ids::{DocumentStore, FixedClock, InMemoryDocumentStore, ShortIdentified};

pub const YEAR: i32 = 2024;

pub fn repository() -> RetailRepository {
    repository_over(InMemoryDocumentStore::new())
}

pub fn repository_over(documents: InMemoryDocumentStore) -> RetailRepository {
    app::repository_with(documents, Arc::new(FixedClock::in_year(YEAR)))
}

/// Insert records straight into the store, bypassing the allocator, the way
/// a bulk import or manual insert would.
pub fn seed<M: ShortIdentified>(documents: &InMemoryDocumentStore, records: Vec<(M, &str)>) {
    for (n, (mut record, short_id)) in records.into_iter().enumerate() {
        record.set_id(format!("seed-{}-{n}", M::COLLECTION));
        record.set_short_id(short_id.to_string());
        documents.insert(&record).unwrap();
    }
}
