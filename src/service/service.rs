//! Service - command handler registry and dispatch.
//!
//! `Service<R>` holds a repository and a set of named command handlers.
//! Each handler receives a `Context<R>` and returns `Result<Value, HandlerError>`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::context::Context;
use super::error::HandlerError;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

/// A microservice that routes commands to handler functions.
pub struct Service<R> {
    repo: R,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler. Returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(&self, command: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command.to_string(), input, &self.repo);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        debug!(command, "dispatching command");
        (handler.handle)(&ctx)
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    ///
    /// Server-side failures are logged in full; the response carries only
    /// the public message.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        match self.dispatch(&request.command, request.input.clone()) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    error!(command = %request.command, error = %e, "command failed");
                }
                CommandResponse {
                    status,
                    body: json!({ "error": e.public_message() }),
                }
            }
        }
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}

/// An inbound command request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub input: Value,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Handler result or `{ "error": ... }`.
    pub body: Value,
}
