use retail_ids::service::HandlerError;
use serde_json::json;

use crate::support::{err, ok, service};

#[test]
fn every_command_is_registered() {
    let service = service();
    let commands = service.commands();

    for kind in ["branch", "customer", "order", "product"] {
        for op in ["create", "get", "list", "update", "delete", "count"] {
            let name = format!("{kind}.{op}");
            assert!(commands.contains(&name.as_str()), "missing {name}");
        }
    }
    for name in [
        "branch.by_location",
        "customer.by_email",
        "customer.count_by_branch",
        "order.by_branch",
        "order.by_customer",
        "order.set_status",
        "order.stats_by_branch",
        "product.by_branch",
        "product.count_by_branch",
        "product.request_restock",
        "product.restock",
        "product.sell",
    ] {
        assert!(commands.contains(&name), "missing {name}");
    }
}

#[test]
fn branch_lifecycle() {
    let service = service();

    let created = ok(
        &service,
        "branch.create",
        json!({ "branchLocation": "Colombo", "branchRegion": "Western", "branchEmail": "col@shop.lk" }),
    );
    assert_eq!(created["branchShortId"], "PAI001");
    assert!(created["createdAt"].is_string());
    assert!(!created["id"].as_str().unwrap().is_empty());

    let fetched = ok(&service, "branch.get", json!({ "shortId": "PAI001" }));
    assert_eq!(fetched, created);

    let updated = ok(
        &service,
        "branch.update",
        json!({ "shortId": "PAI001", "branchRegion": "Capital" }),
    );
    assert_eq!(updated["branchRegion"], "Capital");
    assert_eq!(updated["branchShortId"], "PAI001");

    let found = ok(&service, "branch.by_location", json!({ "branchLocation": "colombo" }));
    assert_eq!(found.as_array().unwrap().len(), 1);

    assert_eq!(ok(&service, "branch.count", json!({})), json!({ "count": 1 }));
    ok(&service, "branch.delete", json!({ "shortId": "PAI001" }));
    assert_eq!(ok(&service, "branch.list", json!({})), json!([]));

    assert!(matches!(
        err(&service, "branch.get", json!({ "shortId": "PAI001" })),
        HandlerError::NotFound(_)
    ));

    // The deleted short ID is never handed out again.
    let next = ok(
        &service,
        "branch.create",
        json!({ "branchLocation": "Kandy", "branchRegion": "Central" }),
    );
    assert_eq!(next["branchShortId"], "PAI002");
}

#[test]
fn update_cannot_change_short_id() {
    let service = service();
    ok(
        &service,
        "branch.create",
        json!({ "branchLocation": "Colombo", "branchRegion": "Western" }),
    );

    let e = err(
        &service,
        "branch.update",
        json!({ "shortId": "PAI001", "branchShortId": "PAI999" }),
    );
    assert_eq!(e.status_code(), 422);
}

#[test]
fn create_requires_mandatory_fields() {
    let service = service();
    let e = err(&service, "branch.create", json!({ "branchRegion": "Western" }));
    assert!(matches!(e, HandlerError::DecodeFailed(_)));

    let e = err(&service, "branch.get", json!({}));
    assert!(matches!(e, HandlerError::GuardRejected(_)));
}

#[test]
fn customers_by_email_and_branch() {
    let service = service();
    for (name, email, branch) in [
        ("Ama", "ama@example.com", "PAI001"),
        ("Kasun", "kasun@example.com", "PAI001"),
        ("Dilini", "dilini@example.com", "PAI002"),
    ] {
        ok(
            &service,
            "customer.create",
            json!({ "customerName": name, "customerEmail": email, "branchShortId": branch }),
        );
    }

    let kasun = ok(
        &service,
        "customer.by_email",
        json!({ "customerEmail": "kasun@example.com" }),
    );
    assert_eq!(kasun["customerShortId"], "2024CUST00002");

    let counted = ok(
        &service,
        "customer.count_by_branch",
        json!({ "branchShortId": "PAI001" }),
    );
    assert_eq!(counted["totalCustomers"], 2);

    let duplicate = err(
        &service,
        "customer.create",
        json!({ "customerName": "Ama 2", "customerEmail": "ama@example.com", "branchShortId": "PAI001" }),
    );
    assert_eq!(duplicate.status_code(), 409);
}

#[test]
fn orders_by_customer_and_status() {
    let service = service();
    for quantity in [1, 2] {
        ok(
            &service,
            "order.create",
            json!({ "customerShortId": "2024CUST00001", "productShortId": "PROD-0001", "quantity": quantity }),
        );
    }
    ok(
        &service,
        "order.create",
        json!({ "customerShortId": "2024CUST00002", "productShortId": "PROD-0001", "quantity": 5 }),
    );

    let orders = ok(
        &service,
        "order.by_customer",
        json!({ "customerShortId": "2024CUST00001" }),
    );
    let short_ids: Vec<&str> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["orderShortID"].as_str().unwrap())
        .collect();
    assert_eq!(short_ids, vec!["ORD-0001", "ORD-0002"]);
    assert_eq!(orders[0]["transactionStatus"], "Pending");

    let completed = ok(
        &service,
        "order.set_status",
        json!({ "shortId": "ORD-0002", "transactionStatus": "Completed" }),
    );
    assert_eq!(completed["transactionStatus"], "Completed");

    let e = err(
        &service,
        "order.set_status",
        json!({ "shortId": "ORD-0002", "transactionStatus": "Cancelled" }),
    );
    assert!(matches!(e, HandlerError::Rejected(_)));
}

#[test]
fn orders_by_branch_and_revenue_per_branch() {
    let service = service();
    for (branch, total) in [("PAI002", 250.0), ("PAI001", 100.0), ("PAI002", 50.5)] {
        ok(
            &service,
            "order.create",
            json!({
                "customerShortId": "2024CUST00001",
                "productShortId": "PROD-0001",
                "branchShortId": branch,
                "quantity": 1,
                "totalPrice": total,
            }),
        );
    }

    let at_second = ok(&service, "order.by_branch", json!({ "branchShortId": "PAI002" }));
    let short_ids: Vec<&str> = at_second
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["orderShortID"].as_str().unwrap())
        .collect();
    assert_eq!(short_ids, vec!["ORD-0001", "ORD-0003"]);

    let stats = ok(&service, "order.stats_by_branch", json!({}));
    assert_eq!(
        stats,
        json!([
            { "branchShortId": "PAI001", "totalOrders": 1, "totalRevenue": 100.0 },
            { "branchShortId": "PAI002", "totalOrders": 2, "totalRevenue": 300.5 },
        ])
    );

    let e = err(&service, "order.by_branch", json!({}));
    assert!(matches!(e, HandlerError::GuardRejected(_)));
}
