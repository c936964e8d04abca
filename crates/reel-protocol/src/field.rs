//! Field identifiers and typed field values.

use crate::error::FieldError;
use crate::record::CastMember;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a record field, as used by bound widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Title,
    Rating,
    Year,
    Description,
    Upcoming,
    Cast,
}

impl FieldId {
    /// All fields in record order.
    pub const ALL: [FieldId; 6] = [
        FieldId::Title,
        FieldId::Rating,
        FieldId::Year,
        FieldId::Description,
        FieldId::Upcoming,
        FieldId::Cast,
    ];

    /// Field name as it appears in deltas and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Title => "title",
            FieldId::Rating => "rating",
            FieldId::Year => "year",
            FieldId::Description => "description",
            FieldId::Upcoming => "upcoming",
            FieldId::Cast => "cast",
        }
    }

    /// Kind of value stored in this field.
    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Title | FieldId::Description => FieldKind::Text,
            FieldId::Rating => FieldKind::Number,
            FieldId::Year => FieldKind::OptionalNumber,
            FieldId::Upcoming => FieldKind::Flag,
            FieldId::Cast => FieldKind::List,
        }
    }

    /// Whether the field holds a repeatable list of items.
    pub fn is_iterable(self) -> bool {
        self.kind() == FieldKind::List
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    OptionalNumber,
    Flag,
    List,
}

/// Typed value flowing between widgets, deltas, and the record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    OptionalNumber(Option<i32>),
    Flag(bool),
    Cast(Vec<CastMember>),
}

impl FieldValue {
    /// Shorthand for a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::OptionalNumber(_) => FieldKind::OptionalNumber,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Cast(_) => FieldKind::List,
        }
    }

    /// Convert raw widget input into the value type of `field`.
    ///
    /// Text fields take the input verbatim. Empty rating input means zero and
    /// empty year input means absent.
    pub fn coerce(field: FieldId, raw: &str) -> Result<Self, FieldError> {
        let invalid = |message: String| FieldError::InvalidValue { field, message };
        match field.kind() {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Number(0.0));
                }
                let number: f64 = trimmed
                    .parse()
                    .map_err(|_| invalid(format!("'{trimmed}' is not a number")))?;
                if !number.is_finite() {
                    return Err(invalid(format!("'{trimmed}' is not a finite number")));
                }
                Ok(FieldValue::Number(number))
            }
            FieldKind::OptionalNumber => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::OptionalNumber(None));
                }
                trimmed
                    .parse()
                    .map(|year| FieldValue::OptionalNumber(Some(year)))
                    .map_err(|_| invalid(format!("'{trimmed}' is not a whole number")))
            }
            FieldKind::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(FieldValue::Flag(true)),
                "false" | "off" | "no" | "0" | "" => Ok(FieldValue::Flag(false)),
                other => Err(invalid(format!("'{other}' is not a boolean"))),
            },
            FieldKind::List => serde_json::from_str(raw)
                .map(FieldValue::Cast)
                .map_err(|err| invalid(err.to_string())),
        }
    }
}
