//! Error types for command handlers.

use thiserror::Error;

use crate::document::DocumentError;
use crate::entity::EntityError;

/// Error type for command handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Business logic rejected the command.
    #[error("rejected: {0}")]
    Rejected(String),
    /// Entity not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// A unique key is taken or the record changed underneath the command.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Guard rejected the command (input validation failed).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Short-ID allocation failed; nothing was persisted.
    #[error("creation failed: {0}")]
    CreationFailed(String),
    /// Storage or other internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<EntityError> for HandlerError {
    fn from(err: EntityError) -> Self {
        match err {
            EntityError::Allocation(e) => HandlerError::CreationFailed(e.to_string()),
            EntityError::Document(e @ DocumentError::Duplicate { .. })
            | EntityError::Document(e @ DocumentError::ConcurrencyConflict { .. }) => {
                HandlerError::Conflict(e.to_string())
            }
            EntityError::Document(e @ DocumentError::NotFound { .. }) => {
                HandlerError::NotFound(e.to_string())
            }
            EntityError::Document(e) => HandlerError::Internal(e.to_string()),
            e @ EntityError::ShortIdImmutable { .. } => HandlerError::Rejected(e.to_string()),
            EntityError::NotFound {
                collection,
                short_id,
            } => HandlerError::NotFound(format!("{collection}:{short_id}")),
            EntityError::Rejected(reason) => HandlerError::Rejected(reason),
        }
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Rejected(_) => 422,
            HandlerError::NotFound(_) => 404,
            HandlerError::Conflict(_) => 409,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::CreationFailed(_) => 500,
            HandlerError::Internal(_) => 500,
        }
    }

    /// Text safe to return to API callers. Server-side failures hide their cause.
    pub fn public_message(&self) -> String {
        match self {
            HandlerError::CreationFailed(_) => "creation failed".to_string(),
            HandlerError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}
