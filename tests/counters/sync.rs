use retail_ids::app;
use retail_ids::retail::{Branch, Customer, Order, Product};
use retail_ids::{
    CounterStore, InMemoryDocumentStore, ShortIdentified, SyncError, SyncOutcome, SyncPolicy,
};

use crate::support;

#[test]
fn sync_repairs_drift_from_a_bulk_import() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![
            (Product::new("a"), "PROD-0001"),
            (Product::new("b"), "PROD-0017"),
            (Product::new("c"), "PROD-0009"),
        ],
    );
    let repo = support::repository_over(documents);

    let outcomes = app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();
    assert!(outcomes.contains(&SyncOutcome::Raised {
        sequence: "productCounter",
        previous: None,
        value: 17
    }));

    let next = repo.create(Product::new("d")).unwrap();
    assert_eq!(next.data.short_id(), Some("PROD-0018"));
}

#[test]
fn sync_never_lowers_a_counter() {
    let documents = InMemoryDocumentStore::new();
    support::seed(&documents, vec![(Branch::new("Kandy", "Central"), "PAI002")]);
    let repo = support::repository_over(documents);
    repo.allocator().store().raise("branchCounter", 30).unwrap();

    app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();

    assert_eq!(repo.allocator().store().current("branchCounter").unwrap(), Some(30));
}

#[test]
fn empty_collections_create_no_counters() {
    let repo = support::repository();
    let outcomes = app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, SyncOutcome::Empty { .. })));
    for sequence in [Branch::SEQUENCE, Customer::SEQUENCE, Order::SEQUENCE, Product::SEQUENCE] {
        assert_eq!(repo.allocator().store().current(sequence).unwrap(), None);
    }
}

#[test]
fn customer_years_do_not_hide_larger_values() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![
            (Customer::new("Old", "old@example.com", "PAI001"), "2023CUST00099"),
            (Customer::new("New", "new@example.com", "PAI001"), "2024CUST00005"),
        ],
    );
    let repo = support::repository_over(documents);

    app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();
    let next = repo
        .create(Customer::new("Next", "next@example.com", "PAI001"))
        .unwrap();
    assert_eq!(next.data.short_id(), Some("2024CUST00100"));
}

#[test]
fn malformed_short_id_is_logged_under_fail_open() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![
            (Order::new("2024CUST00001", "PROD-0001", 1), "ORD-0004"),
            (Order::new("2024CUST00001", "PROD-0001", 1), "ORDER-7"),
        ],
    );
    support::seed(&documents, vec![(Product::new("a"), "PROD-0003")]);
    let repo = support::repository_over(documents);

    let service = app::boot(repo, SyncPolicy::FailOpen).unwrap();

    // The malformed ID is skipped; the well-formed ones still move the counter.
    let counters = service.repo().allocator().store();
    assert_eq!(counters.current("orderCounter").unwrap(), Some(4));
    assert_eq!(counters.current("productCounter").unwrap(), Some(3));
}

#[test]
fn one_legacy_short_id_does_not_cause_a_duplicate() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![
            (Product::new("rice"), "PROD-0001"),
            (Product::new("dhal"), "PROD-legacy"),
        ],
    );
    let repo = support::repository_over(documents);

    let service = app::boot(repo, SyncPolicy::FailOpen).unwrap();
    let counters = service.repo().allocator().store();
    assert_eq!(counters.current("productCounter").unwrap(), Some(1));

    let created = service.repo().create(Product::new("sugar")).unwrap();
    assert_eq!(created.data.product_short_id.as_deref(), Some("PROD-0002"));
}

#[test]
fn malformed_short_id_aborts_boot_under_fail_closed() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![(Order::new("2024CUST00001", "PROD-0001", 1), "ORDER-7")],
    );
    let repo = support::repository_over(documents);

    assert!(matches!(
        app::boot(repo, SyncPolicy::FailClosed),
        Err(SyncError::Malformed {
            collection: "orders",
            skipped: 1,
            ..
        })
    ));
}
