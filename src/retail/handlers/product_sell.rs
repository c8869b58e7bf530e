//! Handler: product.sell

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::entity::EntityError;
use crate::retail::commands::to_json;
use crate::retail::Product;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "product.sell";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub short_id: String,
    pub quantity: u64,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["shortId", "quantity"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    if input.quantity == 0 {
        return Err(HandlerError::Rejected("quantity must be positive".into()));
    }

    let product = ctx
        .repo()
        .update_by_short_id::<Product, _>(&input.short_id, |product| {
            let in_stock = product.product_quantity;
            product.product_quantity = in_stock.checked_sub(input.quantity).ok_or_else(|| {
                EntityError::Rejected(format!(
                    "insufficient stock for {}: {} left, {} requested",
                    input.short_id, in_stock, input.quantity
                ))
            })?;
            Ok(())
        })?;
    to_json(&product.data)
}
