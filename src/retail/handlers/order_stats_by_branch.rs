//! Handler: order.stats_by_branch
//!
//! Returns `[{ "branchShortId", "totalOrders", "totalRevenue" }]`, one entry
//! per branch with at least one order, ordered by branch short ID. Revenue
//! sums `totalPrice` over every order regardless of status.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::Repo;
use crate::retail::Order;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "order.stats_by_branch";

#[derive(Default)]
struct BranchStats {
    orders: usize,
    revenue: f64,
}

pub fn guard(_ctx: &Context<Repo>) -> bool {
    true
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let mut stats: BTreeMap<String, BranchStats> = BTreeMap::new();
    for record in ctx.repo().list::<Order>()? {
        let entry = stats.entry(record.data.branch_short_id).or_default();
        entry.orders += 1;
        entry.revenue += record.data.total_price;
    }

    let rows: Vec<Value> = stats
        .into_iter()
        .map(|(branch, stats)| {
            json!({
                "branchShortId": branch,
                "totalOrders": stats.orders,
                "totalRevenue": stats.revenue,
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
