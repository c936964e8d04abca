//! Error types for the editor core.

use reel_config::ConfigError;
use reel_protocol::{FieldError, FieldId};
use thiserror::Error;

/// Errors raised while binding widgets to fields or translating their events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The `iterable` flag does not match the field's shape.
    #[error("field {field} is {} but was bound as {}", describe(.expected), describe(.requested))]
    ModeMismatch {
        field: FieldId,
        expected: bool,
        requested: bool,
    },
    /// No unused identifier is left for a new list item.
    #[error("no identifiers left for new items in {field}")]
    IdsExhausted { field: FieldId },
    /// Field naming or value conversion failed.
    #[error(transparent)]
    Field(#[from] FieldError),
}

fn describe(iterable: &bool) -> &'static str {
    if *iterable { "a list" } else { "a scalar" }
}

/// Failure of a single save or publish call.
///
/// Reported through the outcome sink and the publish handle; never fatal to
/// the editor and never rolls back the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The request could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),
    /// The receiver answered with a non-success status.
    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// The publisher refused the request.
    #[error("publisher unavailable: {0}")]
    Unavailable(String),
    /// The background task ended without producing an outcome.
    #[error("publish task aborted: {0}")]
    Aborted(String),
}

/// Errors returned while assembling an editor.
#[derive(Debug, Error)]
pub enum ReelCoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Publisher construction error.
    #[error("publisher error: {0}")]
    Publish(#[from] PublishError),
    /// Binding error.
    #[error("binding error: {0}")]
    Bind(#[from] BindError),
}
