//! Error types for field identifiers and values.

use crate::field::{FieldId, FieldKind};
use thiserror::Error;

/// Errors raised when naming fields or converting widget input into field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field name does not belong to the record.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// A value of the wrong kind was supplied for a field.
    #[error("field {field} expects {expected:?} but got {actual:?}")]
    TypeMismatch {
        field: FieldId,
        expected: FieldKind,
        actual: FieldKind,
    },
    /// Raw widget input could not be converted into the field's type.
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: FieldId, message: String },
}
