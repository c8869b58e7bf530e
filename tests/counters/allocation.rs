use std::collections::BTreeSet;
use std::thread;

use retail_ids::retail::{Branch, Customer, Product};
use retail_ids::{CounterStore, ShortIdentified};

use crate::support;

#[test]
fn each_entity_type_has_its_own_sequence() {
    let repo = support::repository();

    let branch = repo.create(Branch::new("Colombo", "Western")).unwrap();
    let product = repo.create(Product::new("Stapler")).unwrap();
    let customer = repo
        .create(Customer::new("Ama", "ama@example.com", "PAI001"))
        .unwrap();

    assert_eq!(branch.data.short_id(), Some("PAI001"));
    assert_eq!(product.data.short_id(), Some("PROD-0001"));
    assert_eq!(customer.data.short_id(), Some("2024CUST00001"));
}

#[test]
fn counters_are_persisted_as_rows_next_to_the_entities() {
    let repo = support::repository();
    for name in ["a", "b", "c"] {
        repo.create(Product::new(name)).unwrap();
    }

    let counters = repo.allocator().store();
    assert_eq!(counters.current("productCounter").unwrap(), Some(3));
    assert_eq!(counters.current("orderCounter").unwrap(), None);
}

#[test]
fn values_past_the_pad_width_are_not_truncated() {
    let repo = support::repository();
    repo.allocator().store().raise("branchCounter", 999).unwrap();

    let branch = repo.create(Branch::new("Galle", "Southern")).unwrap();
    assert_eq!(branch.data.short_id(), Some("PAI1000"));
}

#[test]
fn concurrent_creations_never_share_a_short_id() {
    let repo = support::repository();
    let threads = 8;
    let per_thread = 25;

    let short_ids: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let repo = &repo;
                scope.spawn(move || {
                    (0..per_thread)
                        .map(|n| {
                            let created = repo.create(Product::new(format!("p{t}-{n}"))).unwrap();
                            created.data.product_short_id.unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    let expected: BTreeSet<String> = (1..=(threads * per_thread) as u64)
        .map(|value| Product::FORMAT.format(value, support::YEAR))
        .collect();
    let distinct: BTreeSet<String> = short_ids.iter().cloned().collect();

    assert_eq!(distinct.len(), short_ids.len());
    assert_eq!(distinct, expected);
}

#[test]
fn default_repository_allocates_under_contention() {
    let repo = retail_ids::app::in_memory_repository();
    let threads = 16;
    let per_thread = 100;

    let failures: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let repo = &repo;
                scope.spawn(move || {
                    (0..per_thread)
                        .filter(|n| repo.create(Product::new(format!("p{t}-{n}"))).is_err())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).sum()
    });

    assert_eq!(failures, 0);
    assert_eq!(
        repo.allocator().store().current(Product::SEQUENCE).unwrap(),
        Some((threads * per_thread) as u64)
    );
    assert_eq!(repo.count::<Product>(&|_| true).unwrap(), threads * per_thread);
}
