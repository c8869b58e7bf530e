//! CRUD commands shared by every short-identified entity.
//!
//! `register_entity::<M>(service, "product")` adds `product.create`,
//! `product.get`, `product.list`, `product.update`, `product.delete` and
//! `product.count`. Records are addressed by `{ "shortId": ... }`.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::handlers::Repo;
use crate::entity::{EntityError, ShortIdentified};
use crate::service::{Context, HandlerError, Service};

/// Input of the commands that address one record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortIdInput {
    pub short_id: String,
}

/// Fields the update command never copies from its input.
const IGNORED_ON_UPDATE: &[&str] = &["shortId", "createdAt", "updatedAt"];

/// Register the CRUD commands of `M` under `kind`.
pub fn register_entity<M>(service: Service<Repo>, kind: &str) -> Service<Repo>
where
    M: ShortIdentified + 'static,
{
    service
        .command(&format!("{kind}.create"), create::<M>)
        .command_guarded(&format!("{kind}.get"), has_short_id, get::<M>)
        .command(&format!("{kind}.list"), list::<M>)
        .command_guarded(&format!("{kind}.update"), has_short_id, update::<M>)
        .command_guarded(&format!("{kind}.delete"), has_short_id, delete::<M>)
        .command(&format!("{kind}.count"), count::<M>)
}

pub(crate) fn has_short_id(ctx: &Context<Repo>) -> bool {
    ctx.has_fields(&["shortId"])
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| HandlerError::Internal(e.to_string()))
}

fn create<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let entity = ctx.input::<M>()?;
    let created = ctx.repo().create(entity)?;
    to_json(&created.data)
}

fn get<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ShortIdInput>()?;
    let found = ctx.repo().require::<M>(&input.short_id)?;
    to_json(&found.data)
}

fn list<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let records: Vec<M> = ctx
        .repo()
        .list::<M>()?
        .into_iter()
        .map(|record| record.data)
        .collect();
    to_json(&records)
}

fn update<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ShortIdInput>()?;
    let Some(patch) = ctx.raw_input().as_object() else {
        return Err(HandlerError::DecodeFailed(format!(
            "{} input must be an object",
            ctx.command_name()
        )));
    };

    let updated = ctx.repo().update_by_short_id::<M, _>(&input.short_id, |current| {
        *current = merge(current, patch)?;
        Ok(())
    })?;
    to_json(&updated.data)
}

fn delete<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ShortIdInput>()?;
    if !ctx.repo().delete_by_short_id::<M>(&input.short_id)? {
        return Err(EntityError::NotFound {
            collection: M::COLLECTION,
            short_id: input.short_id,
        }
        .into());
    }
    Ok(json!({ "deleted": input.short_id }))
}

fn count<M: ShortIdentified>(ctx: &Context<Repo>) -> Result<Value, HandlerError> {
    let count = ctx.repo().count::<M>(&|_| true)?;
    Ok(json!({ "count": count }))
}

/// Overlay the fields of `patch` on `current`.
///
/// The primary key and the short ID may be repeated but not changed.
fn merge<M: ShortIdentified>(current: &M, patch: &Map<String, Value>) -> Result<M, EntityError> {
    let mut merged =
        serde_json::to_value(current).map_err(|e| EntityError::Rejected(e.to_string()))?;
    let Some(fields) = merged.as_object_mut() else {
        return Err(EntityError::Rejected(format!(
            "{} is not stored as an object",
            M::COLLECTION
        )));
    };

    for (key, value) in patch {
        if IGNORED_ON_UPDATE.contains(&key.as_str()) {
            continue;
        }
        if key == "id" || key == M::SHORT_ID_FIELD {
            if fields.get(key) != Some(value) {
                return Err(EntityError::Rejected(format!("{key} cannot be changed")));
            }
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }

    serde_json::from_value(merged).map_err(|e| EntityError::Rejected(e.to_string()))
}
