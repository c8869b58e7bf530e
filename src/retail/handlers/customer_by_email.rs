//! Handler: customer.by_email

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::retail::commands::to_json;
use crate::retail::Customer;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "customer.by_email";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub customer_email: String,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["customerEmail"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;

    let customer = ctx
        .repo()
        .find_unique::<Customer>("customer_email", &input.customer_email)?
        .ok_or_else(|| HandlerError::NotFound(format!("customer {}", input.customer_email)))?;
    to_json(&customer.data)
}
