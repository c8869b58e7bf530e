//! Handler: product.restock
//!
//! Adds `quantity` units, or the product's `restockQuantity` when no
//! quantity is given, and clears any pending restock request.

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::entity::EntityError;
use crate::retail::commands::{has_short_id, to_json};
use crate::retail::Product;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "product.restock";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub short_id: String,
    #[serde(default)]
    pub quantity: Option<u64>,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    has_short_id(ctx)
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;

    let product = ctx
        .repo()
        .update_by_short_id::<Product, _>(&input.short_id, |product| {
            let added = input.quantity.unwrap_or(product.restock_quantity);
            product.product_quantity = product
                .product_quantity
                .checked_add(added)
                .ok_or_else(|| EntityError::Rejected("stock quantity overflow".into()))?;
            product.restock_requested = false;
            Ok(())
        })?;
    to_json(&product.data)
}
