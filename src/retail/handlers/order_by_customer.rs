//! Handler: order.by_customer

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::retail::commands::to_json;
use crate::retail::Order;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "order.by_customer";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub customer_short_id: String,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["customerShortId"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let orders: Vec<Order> = ctx
        .repo()
        .find::<Order>(&|order| order.customer_short_id == input.customer_short_id)?
        .into_iter()
        .map(|record| record.data)
        .collect();
    to_json(&orders)
}
