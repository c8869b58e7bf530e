//! retail-service - serves the retail commands over HTTP.
//!
//! Counters are synchronized before the listener is bound, so no request is
//! handled against a drifted counter.

use std::process::ExitCode;
use std::sync::Arc;

use retail_ids::{app, service, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let repo = app::in_memory_repository();
    let retail = match app::boot(repo, config.sync_policy) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!(error = %e, policy = %config.sync_policy, "counter synchronization failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    };

    match service::serve(retail, &config.bind_addr, shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "server failed");
            ExitCode::FAILURE
        }
    }
}
