//! The edited record and its repeatable cast entries.

use crate::delta::Delta;
use crate::field::{FieldId, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form attributes carried by a cast member next to its identifier.
pub type Attributes = Map<String, Value>;

/// Attribute key reserved for the cast member identifier.
const ID_KEY: &str = "id";

/// Application-assigned identifier of a cast member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastId(pub u64);

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CastId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(CastId)
    }
}

/// Entry of the cast list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    /// Identifier, unique within the list it belongs to.
    pub id: CastId,
    /// Caller-supplied attributes (name, role, ...).
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl CastMember {
    /// Build a member from an identifier and attributes.
    ///
    /// An `id` key inside `attributes` is discarded; the identifier always
    /// comes from `id`.
    pub fn new(id: CastId, mut attributes: Attributes) -> Self {
        attributes.remove(ID_KEY);
        Self { id, attributes }
    }

    /// Look up a single attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Look up a string attribute.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Return a copy with one attribute replaced.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ID_KEY {
            self.attributes.insert(key, value.into());
        }
        self
    }
}

/// The single record edited by the form.
///
/// Every field is always present; missing keys decode to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub title: String,
    pub rating: f64,
    pub year: Option<i32>,
    pub description: String,
    pub upcoming: bool,
    pub cast: Vec<CastMember>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            title: String::new(),
            rating: 0.0,
            year: None,
            description: String::new(),
            upcoming: true,
            cast: Vec::new(),
        }
    }
}

impl Record {
    /// Read a field as a typed value.
    pub fn get(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::Title => FieldValue::Text(self.title.clone()),
            FieldId::Rating => FieldValue::Number(self.rating),
            FieldId::Year => FieldValue::OptionalNumber(self.year),
            FieldId::Description => FieldValue::Text(self.description.clone()),
            FieldId::Upcoming => FieldValue::Flag(self.upcoming),
            FieldId::Cast => FieldValue::Cast(self.cast.clone()),
        }
    }

    /// Borrow a repeatable field's items; `None` for scalar fields.
    pub fn list(&self, field: FieldId) -> Option<&[CastMember]> {
        match field {
            FieldId::Cast => Some(&self.cast),
            _ => None,
        }
    }

    /// Shallow-merge a delta over this record, returning the merged copy.
    ///
    /// Only fields named by the delta change; lists are replaced wholesale.
    pub fn apply(&self, delta: &Delta) -> Record {
        let mut next = self.clone();
        if let Some(title) = &delta.title {
            next.title.clone_from(title);
        }
        if let Some(rating) = delta.rating {
            next.rating = rating;
        }
        if let Some(year) = delta.year {
            next.year = year;
        }
        if let Some(description) = &delta.description {
            next.description.clone_from(description);
        }
        if let Some(upcoming) = delta.upcoming {
            next.upcoming = upcoming;
        }
        if let Some(cast) = &delta.cast {
            next.cast.clone_from(cast);
        }
        next
    }

    /// Highest cast identifier currently in use.
    pub fn max_cast_id(&self) -> Option<CastId> {
        self.cast.iter().map(|member| member.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::{CastId, CastMember, Record};
    use crate::{Delta, FieldId, FieldValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn member(id: u64, name: &str) -> CastMember {
        CastMember::new(CastId(id), json!({ "name": name }).as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn defaults_match_initial_form_state() {
        let record = Record::default();
        assert_eq!(record.title, "");
        assert_eq!(record.rating, 0.0);
        assert_eq!(record.year, None);
        assert_eq!(record.description, "");
        assert!(record.upcoming);
        assert!(record.cast.is_empty());
    }

    #[test]
    fn missing_keys_decode_to_defaults() {
        let record: Record = serde_json::from_value(json!({ "title": "Alien" })).expect("decode");
        assert_eq!(record.title, "Alien");
        assert!(record.upcoming);
        assert_eq!(record.year, None);
    }

    #[test]
    fn apply_overwrites_only_named_fields() {
        let mut base = Record::default();
        base.description = "space".to_string();
        base.cast.push(member(1, "Sigourney"));

        let delta = Delta {
            title: Some("Alien".to_string()),
            year: Some(Some(1979)),
            ..Delta::default()
        };
        let next = base.apply(&delta);

        let mut expected = base.clone();
        expected.title = "Alien".to_string();
        expected.year = Some(1979);
        assert_eq!(next, expected);
        assert_eq!(base.title, "");
    }

    #[test]
    fn apply_can_clear_year() {
        let mut base = Record::default();
        base.year = Some(2010);
        let next = base.apply(&Delta {
            year: Some(None),
            ..Delta::default()
        });
        assert_eq!(next.year, None);
    }

    #[test]
    fn apply_replaces_cast_wholesale() {
        let mut base = Record::default();
        base.cast = vec![member(1, "A"), member(2, "B")];
        let next = base.apply(&Delta {
            cast: Some(vec![member(3, "C")]),
            ..Delta::default()
        });
        assert_eq!(next.cast, vec![member(3, "C")]);
    }

    #[test]
    fn new_member_drops_embedded_id() {
        let attrs = json!({ "id": 99, "name": "Tom" }).as_object().cloned().unwrap_or_default();
        let member = CastMember::new(CastId(4), attrs);
        assert_eq!(member.id, CastId(4));
        assert_eq!(member.attribute("id"), None);
        assert_eq!(member.attribute_str("name"), Some("Tom"));
    }

    #[test]
    fn get_reads_typed_values() {
        let record = Record::default();
        assert_eq!(record.get(FieldId::Upcoming), FieldValue::Flag(true));
        assert_eq!(record.get(FieldId::Year), FieldValue::OptionalNumber(None));
        assert!(record.list(FieldId::Title).is_none());
        assert_eq!(record.list(FieldId::Cast).map(<[_]>::len), Some(0));
    }

    #[test]
    fn max_cast_id_tracks_highest_identifier() {
        let mut record = Record::default();
        assert_eq!(record.max_cast_id(), None);
        record.cast = vec![member(7, "A"), member(3, "B")];
        assert_eq!(record.max_cast_id(), Some(CastId(7)));
    }
}
