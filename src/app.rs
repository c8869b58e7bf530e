//! Wiring of the retail service: stores, startup synchronization, commands.
//!
//! ```ignore
//! let config = Config::from_env()?;
//! let repo = app::in_memory_repository();
//! let service = app::boot(repo, config.sync_policy)?;
//! ```

use std::sync::Arc;

use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::counter::{CounterAllocator, DocumentCounterStore};
use crate::document::InMemoryDocumentStore;
use crate::entity::{EntityRepository, ShortIdentified};
use crate::retail::{handlers, register_entity, Branch, Customer, Order, Product};
use crate::service::Service;
use crate::sync::{run_startup_sync, SyncError, SyncOutcome, SyncPolicy};

/// Entities and counter rows share one document store.
pub type RetailRepository =
    EntityRepository<InMemoryDocumentStore, DocumentCounterStore<InMemoryDocumentStore>>;

pub type RetailService = Service<RetailRepository>;

/// Repository over a fresh in-memory store, using the system clock.
pub fn in_memory_repository() -> RetailRepository {
    repository_with(InMemoryDocumentStore::new(), Arc::new(SystemClock))
}

/// Repository over `documents`, with counters kept in the same store.
pub fn repository_with(
    documents: InMemoryDocumentStore,
    clock: Arc<dyn Clock>,
) -> RetailRepository {
    let counters = DocumentCounterStore::new(documents.clone());
    EntityRepository::new(documents, CounterAllocator::new(counters), clock)
}

/// Register every retail command on a service over `repo`.
pub fn build_service(repo: RetailRepository) -> RetailService {
    let service = Service::new(repo);
    let service = register_entity::<Branch>(service, "branch");
    let service = register_entity::<Customer>(service, "customer");
    let service = register_entity::<Order>(service, "order");
    let service = register_entity::<Product>(service, "product");

    crate::register_handlers!(
        service,
        handlers::branch_by_location,
        handlers::customer_by_email,
        handlers::customer_count_by_branch,
        handlers::order_by_branch,
        handlers::order_by_customer,
        handlers::order_set_status,
        handlers::order_stats_by_branch,
        handlers::product_by_branch,
        handlers::product_count_by_branch,
        handlers::product_request_restock,
        handlers::product_restock,
        handlers::product_sell,
    )
}

fn sync_one<M: ShortIdentified>(
    repo: &RetailRepository,
    policy: SyncPolicy,
) -> Result<Option<SyncOutcome>, SyncError> {
    run_startup_sync::<M, _, _>(repo.documents(), repo.allocator().store(), policy)
}

/// Synchronize the counters of all four entity types.
///
/// Under `FailOpen` every collection is attempted and failures are only
/// logged; under `FailClosed` the first failure is returned.
pub fn synchronize_all(
    repo: &RetailRepository,
    policy: SyncPolicy,
) -> Result<Vec<SyncOutcome>, SyncError> {
    let outcomes = [
        sync_one::<Branch>(repo, policy)?,
        sync_one::<Customer>(repo, policy)?,
        sync_one::<Order>(repo, policy)?,
        sync_one::<Product>(repo, policy)?,
    ];
    Ok(outcomes.into_iter().flatten().collect())
}

/// Synchronize counters, then build the service. Nothing is served before
/// synchronization has finished.
pub fn boot(repo: RetailRepository, policy: SyncPolicy) -> Result<RetailService, SyncError> {
    let outcomes = synchronize_all(&repo, policy)?;
    info!(%policy, synchronized = outcomes.len(), "counters synchronized");
    Ok(build_service(repo))
}
