//! Handler: customer.count_by_branch

use serde::Deserialize;
use serde_json::{json, Value};

use super::Repo;
use crate::retail::Customer;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "customer.count_by_branch";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub branch_short_id: String,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["branchShortId"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let total = ctx
        .repo()
        .count::<Customer>(&|customer| customer.branch_short_id == input.branch_short_id)?;
    Ok(json!({ "branchShortId": input.branch_short_id, "totalCustomers": total }))
}
