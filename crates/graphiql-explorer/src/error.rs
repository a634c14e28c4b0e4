//! Error types for the explorer host.

use std::path::PathBuf;

use graphiql_explorer_core::ExplorerError;
use graphiql_explorer_net::NetworkError;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating an [`ExplorerConfig`](crate::ExplorerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or shape error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no known format.
    #[error("Unsupported config format for '{path}' (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// A field failed validation.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a validation error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Top-level error for the explorer host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A fetch failed at the transport level.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// URL-state error.
    #[error(transparent)]
    Core(#[from] ExplorerError),
}
