use std::sync::Arc;

use retail_ids::app::{self, RetailService};
use retail_ids::service::HandlerError;
use retail_ids::{FixedClock, InMemoryDocumentStore, SyncPolicy};
use serde_json::Value;

pub fn service() -> RetailService {
    let repo = app::repository_with(
        InMemoryDocumentStore::new(),
        Arc::new(FixedClock::in_year(2024)),
    );
    app::boot(repo, SyncPolicy::FailClosed).unwrap()
}

pub fn ok(service: &RetailService, command: &str, input: Value) -> Value {
    match service.dispatch(command, input) {
        Ok(value) => value,
        Err(e) => panic!("{command} failed: {e}"),
    }
}

pub fn err(service: &RetailService, command: &str, input: Value) -> HandlerError {
    match service.dispatch(command, input) {
        Ok(value) => panic!("{command} unexpectedly succeeded: {value}"),
        Err(e) => e,
    }
}
