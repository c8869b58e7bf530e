//! Handler: product.by_branch

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::retail::commands::to_json;
use crate::retail::Product;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "product.by_branch";

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
    let products: Vec<Product> = ctx
        .repo()
        .find::<Product>(&|product| product.is_listed_at(&input.branch_short_id))?
        .into_iter()
        .map(|record| record.data)
        .collect();
    to_json(&products)
}
