//! Events emitted by presentation widgets.

use reel_protocol::{Attributes, CastId, CastMember, FieldId, FieldValue};

/// Something a widget reports to the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A scalar widget produced a typed value.
    Change { field: FieldId, value: FieldValue },
    /// A scalar widget produced raw text to be converted to the field's type.
    Input { field: FieldId, raw: String },
    /// A scalar widget lost focus.
    Blur { field: FieldId },
    /// A repeatable widget asked for a new item.
    Create {
        field: FieldId,
        attributes: Attributes,
    },
    /// A repeatable widget edited an existing item.
    Update { field: FieldId, item: CastMember },
    /// A repeatable widget removed an item.
    Delete { field: FieldId, id: CastId },
    /// The publish button was pressed.
    Publish,
}

impl WidgetEvent {
    /// Field the event targets, if any.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            WidgetEvent::Change { field, .. }
            | WidgetEvent::Input { field, .. }
            | WidgetEvent::Blur { field }
            | WidgetEvent::Create { field, .. }
            | WidgetEvent::Update { field, .. }
            | WidgetEvent::Delete { field, .. } => Some(*field),
            WidgetEvent::Publish => None,
        }
    }
}
