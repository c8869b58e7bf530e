//! Handler: order.set_status

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::entity::EntityError;
use crate::retail::commands::to_json;
use crate::retail::{Order, TransactionStatus};
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "order.set_status";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub short_id: String,
    pub transaction_status: TransactionStatus,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["shortId", "transactionStatus"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;

    let order = ctx.repo().update_by_short_id::<Order, _>(&input.short_id, |order| {
        if order.transaction_status != TransactionStatus::Pending
            && order.transaction_status != input.transaction_status
        {
            return Err(EntityError::Rejected(format!(
                "order {} is already {}",
                input.short_id, order.transaction_status
            )));
        }
        order.transaction_status = input.transaction_status;
        Ok(())
    })?;
    to_json(&order.data)
}
