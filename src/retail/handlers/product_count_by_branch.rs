//! Handler: product.count_by_branch
//!
//! Returns `[{ "branchShortId", "totalProducts" }]`, one entry per branch
//! that lists at least one product, ordered by branch short ID.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::Repo;
use crate::retail::Product;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "product.count_by_branch";

pub fn guard(_ctx: &Context<Repo>) -> bool {
    true
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let mut totals: BTreeMap<String, usize> = BTreeMap::new();
    for record in ctx.repo().list::<Product>()? {
        for branch in record.data.branch_short_id {
            *totals.entry(branch).or_default() += 1;
        }
    }

    let counts: Vec<Value> = totals
        .into_iter()
        .map(|(branch, total)| json!({ "branchShortId": branch, "totalProducts": total }))
        .collect();
    Ok(Value::Array(counts))
}
