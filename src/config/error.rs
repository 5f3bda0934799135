//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
///
/// Parse errors (`Io`, `Json`, `Empty`) mean nothing was usable;
/// `Validation` names the offending rule index and field so a long
/// config can be fixed without guessing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config parsing error")]
    Json(#[from] serde_json::Error),

    #[error("config contains no part rules")]
    Empty,

    #[error("config parts[{index}].{field}: {message}")]
    Validation {
        index: usize,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn violation(
        index: usize,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            index,
            field,
            message: message.into(),
        }
    }
}
