use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str)
}

/// Settings for [`crate::Games`]. Every field has a default, so `{}` is a
/// complete config.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: Policy,
    /// Most games kept at once. Unbounded when absent.
    pub session_capacity: Option<usize>
}

impl Config {

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;

        config.policy
                .check()
                .map_err(ConfigError::Invalid)?;

        if config.session_capacity == Some(0) {
            return Err(ConfigError::Invalid("session capacity must be positive"))
        }

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());

        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
