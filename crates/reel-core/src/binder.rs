//! Field binding: translating widget events into record deltas.
//!
//! A [`Binding`] is chosen by the `iterable` flag. Scalar bindings turn a
//! changed value into a one-key delta. List bindings compute a whole new
//! sequence (append, replace by identifier, remove by identifier) and wrap it
//! in a delta for the list field.

use crate::error::BindError;
use reel_protocol::{Attributes, CastId, CastMember, Delta, FieldId, FieldValue};

/// Factory for field bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldBinder;

impl FieldBinder {
    /// Bind `field` in the mode selected by `iterable`.
    pub fn bind(field: FieldId, iterable: bool) -> Result<Binding, BindError> {
        if field.is_iterable() != iterable {
            return Err(BindError::ModeMismatch {
                field,
                expected: field.is_iterable(),
                requested: iterable,
            });
        }
        Ok(if iterable {
            Binding::List(ListBinding { field })
        } else {
            Binding::Scalar(ScalarBinding { field })
        })
    }

    /// Bind a field by its name (`"title"`, `"cast"`, ...).
    pub fn bind_named(name: &str, iterable: bool) -> Result<Binding, BindError> {
        Self::bind(name.parse()?, iterable)
    }
}

/// Wiring for one bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Scalar(ScalarBinding),
    List(ListBinding),
}

impl Binding {
    /// The bound field.
    pub fn field(&self) -> FieldId {
        match self {
            Binding::Scalar(binding) => binding.field,
            Binding::List(binding) => binding.field,
        }
    }
}

/// Binding for a single-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarBinding {
    field: FieldId,
}

impl ScalarBinding {
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Delta `{ field: value }`.
    pub fn change(&self, value: FieldValue) -> Result<Delta, BindError> {
        Ok(Delta::single(self.field, value)?)
    }

    /// Delta for raw widget text, converted to the field's type.
    pub fn change_raw(&self, raw: &str) -> Result<Delta, BindError> {
        self.change(FieldValue::coerce(self.field, raw)?)
    }
}

/// Binding for a repeatable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBinding {
    field: FieldId,
}

impl ListBinding {
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// New sequence with a member built from `attributes` appended at the tail.
    pub fn append(
        &self,
        current: &[CastMember],
        id: CastId,
        attributes: Attributes,
    ) -> Result<Delta, BindError> {
        let mut items = current.to_vec();
        items.push(CastMember::new(id, attributes));
        self.wrap(items)
    }

    /// New sequence with the first member sharing `item.id` replaced by `item`.
    ///
    /// Replace-only: when no member matches, the sequence is returned unchanged
    /// and `item` is dropped.
    pub fn replace(&self, current: &[CastMember], item: CastMember) -> Result<Delta, BindError> {
        let mut items = current.to_vec();
        if let Some(slot) = items.iter_mut().find(|existing| existing.id == item.id) {
            *slot = item;
        }
        self.wrap(items)
    }

    /// New sequence without any member carrying `id`.
    pub fn remove(&self, current: &[CastMember], id: CastId) -> Result<Delta, BindError> {
        let items = current
            .iter()
            .filter(|existing| existing.id != id)
            .cloned()
            .collect();
        self.wrap(items)
    }

    fn wrap(&self, items: Vec<CastMember>) -> Result<Delta, BindError> {
        Ok(Delta::single(self.field, FieldValue::Cast(items))?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Binding, FieldBinder, ListBinding};
    use crate::BindError;
    use pretty_assertions::assert_eq;
    use reel_protocol::{Attributes, CastId, CastMember, FieldError, FieldId, FieldValue};
    use serde_json::json;

    fn attrs(name: &str) -> Attributes {
        json!({ "name": name }).as_object().cloned().unwrap_or_default()
    }

    fn member(id: u64, name: &str) -> CastMember {
        CastMember::new(CastId(id), attrs(name))
    }

    fn cast_binding() -> ListBinding {
        match FieldBinder::bind(FieldId::Cast, true) {
            Ok(Binding::List(binding)) => binding,
            other => panic!("expected list binding, got {other:?}"),
        }
    }

    #[test]
    fn iterable_flag_selects_binding_variant() {
        assert!(matches!(
            FieldBinder::bind(FieldId::Title, false),
            Ok(Binding::Scalar(_))
        ));
        assert!(matches!(
            FieldBinder::bind_named("cast", true),
            Ok(Binding::List(_))
        ));
    }

    #[test]
    fn mismatched_flag_is_rejected() {
        assert_eq!(
            FieldBinder::bind(FieldId::Cast, false),
            Err(BindError::ModeMismatch {
                field: FieldId::Cast,
                expected: true,
                requested: false,
            })
        );
        assert!(FieldBinder::bind(FieldId::Year, true).is_err());
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            FieldBinder::bind_named("genre", false),
            Err(BindError::Field(FieldError::UnknownField("genre".to_string())))
        );
    }

    #[test]
    fn scalar_change_builds_single_key_delta() {
        let Ok(Binding::Scalar(binding)) = FieldBinder::bind(FieldId::Title, false) else {
            panic!("expected scalar binding");
        };
        let delta = binding.change(FieldValue::text("Inception")).expect("delta");
        assert_eq!(delta.fields(), vec![FieldId::Title]);
        assert_eq!(delta.title.as_deref(), Some("Inception"));

        let Ok(Binding::Scalar(year)) = FieldBinder::bind(FieldId::Year, false) else {
            panic!("expected scalar binding");
        };
        assert_eq!(year.change_raw("2010").expect("delta").year, Some(Some(2010)));
    }

    #[test]
    fn append_preserves_order_and_existing_items() {
        let binding = cast_binding();
        let current = vec![member(1, "Alice")];
        let delta = binding
            .append(&current, CastId(2), attrs("Bob"))
            .expect("delta");
        assert_eq!(delta.cast, Some(vec![member(1, "Alice"), member(2, "Bob")]));
    }

    #[test]
    fn replace_swaps_matching_item_in_place() {
        let binding = cast_binding();
        let current = vec![member(1, "Alice"), member(2, "Bob"), member(3, "Cy")];
        let delta = binding
            .replace(&current, member(2, "Robert"))
            .expect("delta");
        assert_eq!(
            delta.cast,
            Some(vec![member(1, "Alice"), member(2, "Robert"), member(3, "Cy")])
        );
    }

    #[test]
    fn replace_without_match_is_not_an_upsert() {
        let binding = cast_binding();
        let current = vec![member(1, "Alice")];
        let delta = binding.replace(&current, member(9, "Ghost")).expect("delta");
        assert_eq!(delta.cast, Some(current));
    }

    #[test]
    fn remove_filters_every_match() {
        let binding = cast_binding();
        let current = vec![member(1, "A"), member(2, "B"), member(1, "A again")];
        let delta = binding.remove(&current, CastId(1)).expect("delta");
        assert_eq!(delta.cast, Some(vec![member(2, "B")]));

        let again = binding
            .remove(delta.cast.as_deref().unwrap_or_default(), CastId(1))
            .expect("delta");
        assert_eq!(again.cast, Some(vec![member(2, "B")]));
    }
}
