//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("[base.url] is required when feeds are enabled")]
    MissingBaseUrl,

    #[error("[base.url] must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("collection `{0}`: items_per_page must be at least 1")]
    InvalidPageSize(String),

    #[error("collection slug `{0}` is used more than once")]
    DuplicateCollection(String),

    #[error("Config validation error: {0}")]
    Validation(String),
}
