//! Form state for the Reel TUI.
//!
//! [`App`] plays the part of the form widgets: it keeps the text the user is
//! typing, tracks focus and the cast selection, and translates key presses
//! into [`WidgetEvent`]s. It never edits the record itself.

use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use reel_core::{PublishOutcome, WidgetEvent};
use reel_protocol::{Attributes, CastMember, FieldId, FieldValue, Record};
use serde_json::Value;
use std::collections::HashMap;

/// Fields in focus order.
pub const FORM_FIELDS: [FieldId; 6] = [
    FieldId::Title,
    FieldId::Year,
    FieldId::Upcoming,
    FieldId::Description,
    FieldId::Rating,
    FieldId::Cast,
];

const NAME_ATTRIBUTE: &str = "name";

/// What the run loop should do with a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Nothing to report.
    Ignore,
    /// Leave the editor.
    Quit,
    /// Forward these events to the editor, in order.
    Emit(Vec<WidgetEvent>),
}

/// Top-level application state for the TUI.
pub struct App {
    /// Index into [`FORM_FIELDS`] of the focused field.
    pub focus: usize,
    /// Text shown in each text-like field.
    pub buffers: HashMap<FieldId, String>,
    /// Name typed on the cast editor line.
    pub cast_input: String,
    /// Selected cast member; `None` is the new-member line.
    pub cast_selected: Option<usize>,
    /// Status line text.
    pub status: String,
    /// Saves dispatched but not yet reported.
    pub pending_saves: usize,
    /// Description of the active publisher, shown in the header.
    pub publisher: String,
}

impl App {
    /// Create the form state for `record`.
    pub fn new(record: &Record, publisher: impl Into<String>) -> Self {
        let mut app = Self {
            focus: 0,
            buffers: HashMap::new(),
            cast_input: String::new(),
            cast_selected: None,
            status: "idle".to_string(),
            pending_saves: 0,
            publisher: publisher.into(),
        };
        for field in FORM_FIELDS {
            app.buffers.insert(field, display_value(record, field));
        }
        app
    }

    /// The focused field.
    pub fn focused(&self) -> FieldId {
        FORM_FIELDS[self.focus % FORM_FIELDS.len()]
    }

    /// Text shown for `field`.
    pub fn buffer(&self, field: FieldId) -> &str {
        self.buffers.get(&field).map_or("", String::as_str)
    }

    /// Refresh every unfocused field from the record.
    ///
    /// The focused field keeps what the user typed so partial input such as
    /// `4.` survives the round trip through the record.
    pub fn sync_from(&mut self, record: &Record) {
        let focused = self.focused();
        for field in FORM_FIELDS {
            if field != focused {
                self.buffers.insert(field, display_value(record, field));
            }
        }
        self.cast_selected = match self.cast_selected {
            Some(_) if record.cast.is_empty() => None,
            Some(index) => Some(index.min(record.cast.len() - 1)),
            None => None,
        };
    }

    pub fn push_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Note a save the editor just dispatched.
    pub fn save_started(&mut self, publish: bool) {
        self.pending_saves += 1;
        self.push_status(if publish { "publishing" } else { "saving" });
    }

    /// Show the result of a finished save.
    pub fn record_outcome(&mut self, outcome: &PublishOutcome) {
        self.pending_saves = self.pending_saves.saturating_sub(1);
        let status = match &outcome.result {
            Ok(_) if outcome.publish => format!("published (seq={})", outcome.seq),
            Ok(_) => format!("saved (seq={})", outcome.seq),
            Err(err) => format!("save failed (seq={}): {err}", outcome.seq),
        };
        self.push_status(status);
    }

    /// Translate a key press into editor events.
    pub fn handle_key(&mut self, key: KeyEvent, record: &Record) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return KeyAction::Quit,
            KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('p') if ctrl => return KeyAction::Emit(vec![WidgetEvent::Publish]),
            KeyCode::Tab => return self.move_focus(1, record),
            KeyCode::BackTab => return self.move_focus(FORM_FIELDS.len() - 1, record),
            _ if ctrl => return KeyAction::Ignore,
            _ => {}
        }

        match self.focused() {
            FieldId::Upcoming => match key.code {
                KeyCode::Char(' ') => KeyAction::Emit(vec![WidgetEvent::Change {
                    field: FieldId::Upcoming,
                    value: FieldValue::Flag(!record.upcoming),
                }]),
                _ => KeyAction::Ignore,
            },
            FieldId::Year => self.handle_year_key(key, record),
            FieldId::Cast => self.handle_cast_key(key, record),
            field => self.edit_buffer(field, key.code),
        }
    }

    fn move_focus(&mut self, step: usize, record: &Record) -> KeyAction {
        let leaving = self.focused();
        let mut events = Vec::new();
        if !leaving.is_iterable() {
            events.push(WidgetEvent::Blur { field: leaving });
        }
        self.focus = (self.focus + step) % FORM_FIELDS.len();
        if self.focused() == FieldId::Cast {
            self.cast_selected = None;
            self.cast_input.clear();
        }
        let focused = self.focused();
        self.buffers.insert(focused, display_value(record, focused));
        debug!("focus moved (from={}, to={})", leaving, focused);
        KeyAction::Emit(events)
    }

    fn edit_buffer(&mut self, field: FieldId, code: KeyCode) -> KeyAction {
        let buffer = self.buffers.entry(field).or_default();
        match code {
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Enter if field == FieldId::Description => buffer.push('\n'),
            KeyCode::Backspace => {
                if buffer.pop().is_none() {
                    return KeyAction::Ignore;
                }
            }
            _ => return KeyAction::Ignore,
        }
        KeyAction::Emit(vec![WidgetEvent::Input {
            field,
            raw: buffer.clone(),
        }])
    }

    fn handle_year_key(&mut self, key: KeyEvent, record: &Record) -> KeyAction {
        let step = |by: i32| match record.year {
            Some(year) => year.checked_add(by),
            None => Some(current_year()),
        };
        let stepped = match key.code {
            KeyCode::Up => step(1),
            KeyCode::Down => step(-1),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                return self.edit_buffer(FieldId::Year, key.code);
            }
            KeyCode::Backspace => return self.edit_buffer(FieldId::Year, key.code),
            _ => return KeyAction::Ignore,
        };
        let Some(stepped) = stepped else {
            return KeyAction::Ignore;
        };
        self.buffers.insert(FieldId::Year, stepped.to_string());
        KeyAction::Emit(vec![WidgetEvent::Change {
            field: FieldId::Year,
            value: FieldValue::OptionalNumber(Some(stepped)),
        }])
    }

    fn handle_cast_key(&mut self, key: KeyEvent, record: &Record) -> KeyAction {
        let cast = &record.cast;
        match key.code {
            KeyCode::Up => {
                self.cast_selected = match self.cast_selected {
                    None if cast.is_empty() => None,
                    None => Some(cast.len() - 1),
                    Some(index) => Some(index.saturating_sub(1)),
                };
                self.load_selected(cast);
                KeyAction::Ignore
            }
            KeyCode::Down => {
                self.cast_selected = match self.cast_selected {
                    Some(index) if index + 1 < cast.len() => Some(index + 1),
                    _ => None,
                };
                self.load_selected(cast);
                KeyAction::Ignore
            }
            KeyCode::Enter => {
                let name = self.cast_input.trim().to_string();
                match self.cast_selected.and_then(|index| cast.get(index)) {
                    Some(member) => KeyAction::Emit(vec![WidgetEvent::Update {
                        field: FieldId::Cast,
                        item: member.clone().with_attribute(NAME_ATTRIBUTE, name),
                    }]),
                    None if name.is_empty() => KeyAction::Ignore,
                    None => {
                        self.cast_input.clear();
                        let mut attributes = Attributes::new();
                        attributes.insert(NAME_ATTRIBUTE.to_string(), Value::String(name));
                        KeyAction::Emit(vec![WidgetEvent::Create {
                            field: FieldId::Cast,
                            attributes,
                        }])
                    }
                }
            }
            KeyCode::Delete => match self.cast_selected.and_then(|index| cast.get(index)) {
                Some(member) => KeyAction::Emit(vec![WidgetEvent::Delete {
                    field: FieldId::Cast,
                    id: member.id,
                }]),
                None => KeyAction::Ignore,
            },
            KeyCode::Char(ch) => {
                self.cast_input.push(ch);
                KeyAction::Ignore
            }
            KeyCode::Backspace => {
                self.cast_input.pop();
                KeyAction::Ignore
            }
            _ => KeyAction::Ignore,
        }
    }

    fn load_selected(&mut self, cast: &[CastMember]) {
        self.cast_input = self
            .cast_selected
            .and_then(|index| cast.get(index))
            .map(|member| member_name(member).to_string())
            .unwrap_or_default();
    }
}

/// Display name of a cast member.
pub fn member_name(member: &CastMember) -> &str {
    member.attribute_str(NAME_ATTRIBUTE).unwrap_or("")
}

/// Text shown for `field` when it is not being edited.
pub fn display_value(record: &Record, field: FieldId) -> String {
    match field {
        FieldId::Title => record.title.clone(),
        FieldId::Description => record.description.clone(),
        FieldId::Rating => record.rating.to_string(),
        FieldId::Year => record.year.map(|year| year.to_string()).unwrap_or_default(),
        FieldId::Upcoming => String::from(if record.upcoming { "[x]" } else { "[ ]" }),
        FieldId::Cast => format!("{} members", record.cast.len()),
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}
