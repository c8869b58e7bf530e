//! HTTP transport - maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command` - dispatch a command. Body = JSON input.
//! - `GET /health` - health check returning `{ "ok": true, "commands": [...] }`.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::service::{CommandRequest, Service};

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at `addr` until `shutdown` resolves.
pub async fn serve<R, F>(service: Arc<Service<R>>, addr: &str, shutdown: F) -> Result<(), std::io::Error>
where
    R: Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    let commands: Vec<&str> = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let response = service.dispatch_request(&CommandRequest { command, input });
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}
