//! Partial record updates.

use crate::error::FieldError;
use crate::field::{FieldId, FieldValue};
use crate::record::CastMember;
use serde::{Deserialize, Deserializer, Serialize};

/// Partial record: each `Some` names a field and its replacement value.
///
/// `year` is doubly optional so a delta can clear the year (`Some(None)`)
/// as well as leave it untouched (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Delta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub year: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
}

/// Treat a key that is present (even as `null`) as set.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Delta {
    /// Delta that sets a single field.
    pub fn single(field: FieldId, value: FieldValue) -> Result<Self, FieldError> {
        let mut delta = Delta::default();
        delta.set(field, value)?;
        Ok(delta)
    }

    /// Set one field, checking that the value kind matches the field.
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldError> {
        let mismatch = |value: &FieldValue| FieldError::TypeMismatch {
            field,
            expected: field.kind(),
            actual: value.kind(),
        };
        match (field, value) {
            (FieldId::Title, FieldValue::Text(text)) => self.title = Some(text),
            (FieldId::Description, FieldValue::Text(text)) => self.description = Some(text),
            (FieldId::Rating, FieldValue::Number(number)) => self.rating = Some(number),
            (FieldId::Year, FieldValue::OptionalNumber(year)) => self.year = Some(year),
            (FieldId::Upcoming, FieldValue::Flag(flag)) => self.upcoming = Some(flag),
            (FieldId::Cast, FieldValue::Cast(cast)) => self.cast = Some(cast),
            (_, value) => return Err(mismatch(&value)),
        }
        Ok(())
    }

    /// Value this delta assigns to `field`, if any.
    pub fn get(&self, field: FieldId) -> Option<FieldValue> {
        match field {
            FieldId::Title => self.title.clone().map(FieldValue::Text),
            FieldId::Rating => self.rating.map(FieldValue::Number),
            FieldId::Year => self.year.map(FieldValue::OptionalNumber),
            FieldId::Description => self.description.clone().map(FieldValue::Text),
            FieldId::Upcoming => self.upcoming.map(FieldValue::Flag),
            FieldId::Cast => self.cast.clone().map(FieldValue::Cast),
        }
    }

    /// Fields touched by this delta, in record order.
    pub fn fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|field| self.touches(*field))
            .collect()
    }

    /// Whether the delta assigns `field`.
    pub fn touches(&self, field: FieldId) -> bool {
        match field {
            FieldId::Title => self.title.is_some(),
            FieldId::Rating => self.rating.is_some(),
            FieldId::Year => self.year.is_some(),
            FieldId::Description => self.description.is_some(),
            FieldId::Upcoming => self.upcoming.is_some(),
            FieldId::Cast => self.cast.is_some(),
        }
    }

    /// True when no field is assigned.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Combine with a later delta; keys set by `later` win.
    pub fn merge(self, later: Delta) -> Delta {
        Delta {
            title: later.title.or(self.title),
            rating: later.rating.or(self.rating),
            year: later.year.or(self.year),
            description: later.description.or(self.description),
            upcoming: later.upcoming.or(self.upcoming),
            cast: later.cast.or(self.cast),
        }
    }
}
