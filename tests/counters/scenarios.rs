//! The five end-to-end short-ID scenarios.

use std::thread;

use retail_ids::app;
use retail_ids::retail::{Branch, Customer, Order, Product};
use retail_ids::{
    format_short_id, CounterAllocator, CounterStore, InMemoryCounterStore, InMemoryDocumentStore,
    ShortIdentified, SyncPolicy,
};

use crate::support;

#[test]
fn fresh_product_counter_starts_at_one() {
    let allocator = CounterAllocator::new(InMemoryCounterStore::new());
    let value = allocator.allocate("productCounter").unwrap();

    assert_eq!(value, 1);
    assert_eq!(format_short_id("PROD-", value, 4, None), "PROD-0001");
}

#[test]
fn branch_counter_at_six_yields_pai007() {
    let repo = support::repository();
    repo.allocator().store().raise("branchCounter", 6).unwrap();

    assert_eq!(repo.allocator().allocate("branchCounter").unwrap(), 7);
    assert_eq!(format_short_id("PAI", 7, 3, None), "PAI007");

    let branch = repo.create(Branch::new("Matara", "Southern")).unwrap();
    assert_eq!(branch.data.short_id(), Some("PAI008"));
}

#[test]
fn customer_sync_then_allocate() {
    let documents = InMemoryDocumentStore::new();
    support::seed(
        &documents,
        vec![(
            Customer::new("Nimal", "nimal@example.com", "PAI001"),
            "2024CUST00042",
        )],
    );
    let repo = support::repository_over(documents);
    repo.allocator().store().raise("customerCounter", 10).unwrap();

    app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();
    assert_eq!(
        repo.allocator().store().current("customerCounter").unwrap(),
        Some(42)
    );

    let customer = repo
        .create(Customer::new("Kumari", "kumari@example.com", "PAI001"))
        .unwrap();
    assert_eq!(customer.data.short_id(), Some("2024CUST00043"));
}

#[test]
fn empty_orders_sync_is_a_no_op() {
    let repo = support::repository();
    app::synchronize_all(&repo, SyncPolicy::FailClosed).unwrap();
    assert_eq!(repo.allocator().store().current("orderCounter").unwrap(), None);

    let order = repo
        .create(Order::new("2024CUST00001", "PROD-0001", 2))
        .unwrap();
    assert_eq!(order.data.short_id(), Some("ORD-0001"));
    assert!(order.data.order_date.is_some());
}

#[test]
fn simultaneous_product_creations_get_distinct_ids() {
    let repo = support::repository();

    let mut short_ids: Vec<String> = thread::scope(|scope| {
        let first = scope.spawn(|| repo.create(Product::new("left")).unwrap());
        let second = scope.spawn(|| repo.create(Product::new("right")).unwrap());
        [first.join().unwrap(), second.join().unwrap()]
            .into_iter()
            .map(|created| created.data.short_id().unwrap().to_string())
            .collect()
    });
    short_ids.sort();

    assert_eq!(short_ids, vec!["PROD-0001", "PROD-0002"]);
    assert_eq!(repo.list::<Product>().unwrap().len(), 2);
}
