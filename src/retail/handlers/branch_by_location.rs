//! Handler: branch.by_location

use serde::Deserialize;
use serde_json::Value;

use super::Repo;
use crate::retail::commands::to_json;
use crate::retail::Branch;
use crate::service::{Context, HandlerError};

pub const COMMAND: &str = "branch.by_location";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub branch_location: String,
}

pub fn guard(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["branchLocation"])
}

pub fn handle(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let location = input.branch_location.trim();

    let branches: Vec<Branch> = ctx
        .repo()
        .find::<Branch>(&|branch| branch.branch_location.eq_ignore_ascii_case(location))?
        .into_iter()
        .map(|record| record.data)
        .collect();
    to_json(&branches)
}
