//! Error types for config loading and validation.

use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config layer from disk failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// A layer is not valid JSON5.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The merged layers do not decode into `ReelConfig`.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// A key is unknown or holds the wrong JSON type.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// The http publisher was selected without an endpoint.
    #[error("publisher.kind is \"http\" but publisher.endpoint is not set")]
    MissingEndpoint,
    /// The configured endpoint is not an http(s) URL.
    #[error("publisher.endpoint must be an http or https url: {0}")]
    InvalidEndpoint(String),
    /// Two initial cast members share an identifier.
    #[error("form.initial.cast has duplicate id {0}")]
    DuplicateCastId(u64),
}
