//! Service configuration from environment variables.
//!
//! | Variable                    | Default        |
//! |-----------------------------|----------------|
//! | `RETAIL_BIND_ADDR`          | `0.0.0.0:5000` |
//! | `PORT` (if no bind address) | -              |
//! | `RETAIL_SYNC_POLICY`        | `fail-open`    |

use std::env;

use thiserror::Error;

use crate::sync::{SyncPolicy, UnknownSyncPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub sync_policy: SyncPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            sync_policy: SyncPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_addr = match (lookup("RETAIL_BIND_ADDR"), lookup("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => {
                let port: u16 = port.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
                    name: "PORT",
                    value: port.clone(),
                    reason: e.to_string(),
                })?;
                format!("0.0.0.0:{port}")
            }
            (None, None) => defaults.bind_addr,
        };

        let sync_policy = match lookup("RETAIL_SYNC_POLICY") {
            Some(value) => value.parse::<SyncPolicy>().map_err(|e: UnknownSyncPolicy| ConfigError {
                name: "RETAIL_SYNC_POLICY",
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.sync_policy,
        };

        Ok(Config {
            bind_addr,
            sync_policy,
        })
    }
}
