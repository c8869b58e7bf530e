//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// The context passed to every command handler.
///
/// Generic over `R` (the repository type) so handlers can access
/// whatever repository the service is configured with.
pub struct Context<'a, R> {
    command_name: String,
    input: Value,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(command_name: String, input: Value, repo: &'a R) -> Self {
        Self {
            command_name,
            input,
            repo,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Check if the raw input contains a non-null field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|value| !value.is_null())
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
