use retail_ids::service::HandlerError;
use serde_json::json;

use crate::support::{err, ok, service};

fn create_product(service: &retail_ids::app::RetailService, name: &str, branches: &[&str]) {
    ok(
        service,
        "product.create",
        json!({
            "productName": name,
            "productQuantity": 15,
            "actualPrice": 100.0,
            "sellingPrice": 150.0,
            "branchShortId": branches,
        }),
    );
}

#[test]
fn create_derives_profit_and_restock_flag() {
    let service = service();
    create_product(&service, "Kettle", &["PAI001"]);

    let kettle = ok(&service, "product.get", json!({ "shortId": "PROD-0001" }));
    assert_eq!(kettle["profit"], 50.0);
    assert_eq!(kettle["threshold"], 10);
    assert_eq!(kettle["needsRestock"], false);
}

#[test]
fn sell_then_restock() {
    let service = service();
    create_product(&service, "Kettle", &["PAI001"]);

    let sold = ok(
        &service,
        "product.sell",
        json!({ "shortId": "PROD-0001", "quantity": 6 }),
    );
    assert_eq!(sold["productQuantity"], 9);
    assert_eq!(sold["needsRestock"], true);

    let e = err(
        &service,
        "product.sell",
        json!({ "shortId": "PROD-0001", "quantity": 10 }),
    );
    assert!(matches!(e, HandlerError::Rejected(ref msg) if msg.contains("insufficient stock")));

    // No quantity: the product's restockQuantity (20) is added.
    let restocked = ok(&service, "product.restock", json!({ "shortId": "PROD-0001" }));
    assert_eq!(restocked["productQuantity"], 29);
    assert_eq!(restocked["needsRestock"], false);

    let restocked = ok(
        &service,
        "product.restock",
        json!({ "shortId": "PROD-0001", "quantity": 1 }),
    );
    assert_eq!(restocked["productQuantity"], 30);
}

#[test]
fn restock_request_persists_until_restocked() {
    let service = service();
    create_product(&service, "Kettle", &["PAI001"]);

    let requested = ok(
        &service,
        "product.request_restock",
        json!({ "shortId": "PROD-0001" }),
    );
    assert_eq!(requested["needsRestock"], true);

    // An unrelated save keeps the request.
    let renamed = ok(
        &service,
        "product.update",
        json!({ "shortId": "PROD-0001", "productName": "Electric Kettle" }),
    );
    assert_eq!(renamed["needsRestock"], true);

    let restocked = ok(
        &service,
        "product.restock",
        json!({ "shortId": "PROD-0001", "quantity": 5 }),
    );
    assert_eq!(restocked["restockRequested"], false);
    assert_eq!(restocked["needsRestock"], false);
}

#[test]
fn products_by_branch_and_per_branch_totals() {
    let service = service();
    create_product(&service, "Kettle", &["PAI001", "PAI002"]);
    create_product(&service, "Toaster", &["PAI001"]);
    create_product(&service, "Fan", &["PAI003"]);

    let at_first = ok(
        &service,
        "product.by_branch",
        json!({ "branchShortId": "PAI001" }),
    );
    assert_eq!(at_first.as_array().unwrap().len(), 2);

    let totals = ok(&service, "product.count_by_branch", json!({}));
    assert_eq!(
        totals,
        json!([
            { "branchShortId": "PAI001", "totalProducts": 2 },
            { "branchShortId": "PAI002", "totalProducts": 1 },
            { "branchShortId": "PAI003", "totalProducts": 1 },
        ])
    );
}

#[test]
fn unknown_product_is_not_found() {
    let service = service();
    let e = err(
        &service,
        "product.sell",
        json!({ "shortId": "PROD-0404", "quantity": 1 }),
    );
    assert_eq!(e.status_code(), 404);
}

#[test]
fn sell_addresses_the_product_by_short_id() {
    let service = service();
    create_product(&service, "Kettle", &["PAI001"]);

    let e = err(
        &service,
        "product.sell",
        json!({ "productShortId": "PROD-0001", "quantity": 1 }),
    );
    assert!(matches!(e, HandlerError::GuardRejected(_)));
}
