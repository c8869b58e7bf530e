//! Handler: product.request_restock

use serde_json::Value;

use super::Repo;
use crate::retail::commands::{has_short_id, to_json, ShortIdInput};
use crate::retail::Product;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "product.request_restock";

pub fn guard(ctx: &Context<Repo>) -> bool {
    has_short_id(ctx)
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ShortIdInput>()?;
    let product = ctx
        .repo()
        .update_by_short_id::<Product, _>(&input.short_id, |product| {
            product.restock_requested = true;
            Ok(())
        })?;
    to_json(&product.data)
}
