//! The editor: a record store wired to field bindings and a publisher.
//!
//! Front ends either hold per-field handles from [`Editor::binding`] or feed
//! [`WidgetEvent`]s to [`Editor::dispatch`]. Both paths go through the same
//! binder, so a widget event always becomes exactly one delta (or one save).

use crate::api::MockApi;
use crate::binder::{Binding, FieldBinder, ListBinding, ScalarBinding};
use crate::error::{BindError, ReelCoreError};
use crate::event::WidgetEvent;
use crate::http::publisher_from_config;
use crate::ids::IdAllocator;
use crate::publish::{LogSink, OutcomeSink, PublishDispatcher, PublishHandle, Publisher};
use crate::store::RecordStore;
use log::{debug, info};
use reel_config::ReelConfig;
use reel_protocol::{Attributes, CastId, CastMember, Delta, FieldId, FieldValue, Record};
use std::sync::Arc;

/// Owns the record and routes widget events into it.
pub struct Editor {
    store: RecordStore,
    ids: IdAllocator,
    dispatcher: PublishDispatcher,
    autosave_on_blur: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Arc::new(MockApi::new()))
    }
}

impl Editor {
    /// Editor over a default record, logging outcomes.
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self {
            store: RecordStore::default(),
            ids: IdAllocator::new(),
            dispatcher: PublishDispatcher::new(publisher, Arc::new(LogSink)),
            autosave_on_blur: true,
        }
    }

    /// Editor built from a loaded config.
    pub fn from_config(config: &ReelConfig) -> Result<Self, ReelCoreError> {
        config.validate()?;
        let publisher = publisher_from_config(&config.publisher)?;
        info!(
            "editor configured (publisher={:?}, autosave_on_blur={})",
            config.publisher.kind, config.form.autosave_on_blur
        );
        Ok(Self::new(publisher)
            .with_record(config.form.initial_record())
            .with_autosave_on_blur(config.form.autosave_on_blur))
    }

    /// Start from an existing record instead of the defaults.
    pub fn with_record(mut self, record: Record) -> Self {
        self.ids = IdAllocator::after(&record);
        self.store = RecordStore::new(record);
        self
    }

    /// Report outcomes to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn OutcomeSink>) -> Self {
        self.dispatcher.set_sink(sink);
        self
    }

    pub fn with_autosave_on_blur(mut self, enabled: bool) -> Self {
        self.autosave_on_blur = enabled;
        self
    }

    pub fn autosave_on_blur(&self) -> bool {
        self.autosave_on_blur
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> Arc<Record> {
        self.store.current()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Number of saves dispatched so far.
    pub fn saves_dispatched(&self) -> u64 {
        self.dispatcher.dispatched()
    }

    /// Handle wiring `field` in the mode chosen by `iterable`.
    pub fn binding(&mut self, field: FieldId, iterable: bool) -> Result<FieldHandle<'_>, BindError> {
        Ok(match FieldBinder::bind(field, iterable)? {
            Binding::Scalar(binding) => FieldHandle::Scalar(ScalarHandle {
                editor: self,
                binding,
            }),
            Binding::List(binding) => FieldHandle::List(ListHandle {
                editor: self,
                binding,
            }),
        })
    }

    /// Scalar handle for `field`.
    pub fn scalar(&mut self, field: FieldId) -> Result<ScalarHandle<'_>, BindError> {
        match self.binding(field, false)? {
            FieldHandle::Scalar(handle) => Ok(handle),
            FieldHandle::List(_) => Err(BindError::ModeMismatch {
                field,
                expected: true,
                requested: false,
            }),
        }
    }

    /// List handle for `field`.
    pub fn list(&mut self, field: FieldId) -> Result<ListHandle<'_>, BindError> {
        match self.binding(field, true)? {
            FieldHandle::List(handle) => Ok(handle),
            FieldHandle::Scalar(_) => Err(BindError::ModeMismatch {
                field,
                expected: false,
                requested: true,
            }),
        }
    }

    /// Route a widget event through its binding.
    ///
    /// Returns the save handle when the event caused a save.
    pub fn dispatch(&mut self, event: WidgetEvent) -> Result<Option<PublishHandle>, BindError> {
        debug!("widget event (field={:?})", event.field());
        match event {
            WidgetEvent::Change { field, value } => {
                self.scalar(field)?.on_change(value)?;
                Ok(None)
            }
            WidgetEvent::Input { field, raw } => {
                self.scalar(field)?.on_change_raw(&raw)?;
                Ok(None)
            }
            WidgetEvent::Blur { field } => Ok(self.scalar(field)?.on_blur()),
            WidgetEvent::Create { field, attributes } => {
                self.list(field)?.on_create(attributes)?;
                Ok(None)
            }
            WidgetEvent::Update { field, item } => {
                self.list(field)?.on_update(item)?;
                Ok(None)
            }
            WidgetEvent::Delete { field, id } => {
                self.list(field)?.on_delete(id)?;
                Ok(None)
            }
            WidgetEvent::Publish => Ok(Some(self.publish(true))),
        }
    }

    /// Save the current record with `publish`.
    ///
    /// The snapshot is taken before this returns; later edits do not reach
    /// the dispatched request.
    pub fn publish(&self, publish: bool) -> PublishHandle {
        self.store.publish(publish, &self.dispatcher)
    }

    fn apply(&mut self, delta: &Delta) -> Arc<Record> {
        let record = self.store.apply(delta);
        if delta.cast.is_some() {
            self.ids.observe(&record);
        }
        record
    }
}

/// Handle for one bound field.
pub enum FieldHandle<'a> {
    Scalar(ScalarHandle<'a>),
    List(ListHandle<'a>),
}

impl FieldHandle<'_> {
    pub fn field(&self) -> FieldId {
        match self {
            FieldHandle::Scalar(handle) => handle.binding.field(),
            FieldHandle::List(handle) => handle.binding.field(),
        }
    }
}

/// Change and blur handlers for a single-valued field.
pub struct ScalarHandle<'a> {
    editor: &'a mut Editor,
    binding: ScalarBinding,
}

impl ScalarHandle<'_> {
    /// Current value of the field.
    pub fn value(&self) -> FieldValue {
        self.editor.current().get(self.binding.field())
    }

    /// Apply `{ field: value }`.
    pub fn on_change(&mut self, value: FieldValue) -> Result<(), BindError> {
        let delta = self.binding.change(value)?;
        self.editor.apply(&delta);
        Ok(())
    }

    /// Apply raw widget text converted to the field's type.
    pub fn on_change_raw(&mut self, raw: &str) -> Result<(), BindError> {
        let delta = self.binding.change_raw(raw)?;
        self.editor.apply(&delta);
        Ok(())
    }

    /// Save without publishing, unless blur saves are disabled.
    pub fn on_blur(&mut self) -> Option<PublishHandle> {
        if !self.editor.autosave_on_blur {
            debug!(
                "blur save skipped (field={}, autosave_on_blur=false)",
                self.binding.field()
            );
            return None;
        }
        Some(self.editor.publish(false))
    }
}

/// Create, update and delete handlers for a repeatable field.
pub struct ListHandle<'a> {
    editor: &'a mut Editor,
    binding: ListBinding,
}

impl ListHandle<'_> {
    /// Items currently in the list.
    pub fn items(&self) -> Vec<CastMember> {
        self.editor
            .current()
            .list(self.binding.field())
            .map(<[CastMember]>::to_vec)
            .unwrap_or_default()
    }

    /// Append a new item built from `attributes` under a fresh identifier.
    pub fn on_create(&mut self, attributes: Attributes) -> Result<CastId, BindError> {
        let field = self.binding.field();
        let id = self
            .editor
            .ids
            .next_id()
            .ok_or(BindError::IdsExhausted { field })?;
        let delta = self.binding.append(&self.items(), id, attributes)?;
        self.editor.apply(&delta);
        debug!("list item created (field={}, id={})", field, id);
        Ok(id)
    }

    /// Replace the item sharing `item.id`. Returns whether one matched.
    pub fn on_update(&mut self, item: CastMember) -> Result<bool, BindError> {
        let current = self.items();
        let matched = current.iter().any(|existing| existing.id == item.id);
        let delta = self.binding.replace(&current, item)?;
        self.editor.apply(&delta);
        Ok(matched)
    }

    /// Remove every item carrying `id`. Returns how many were removed.
    pub fn on_delete(&mut self, id: CastId) -> Result<usize, BindError> {
        let current = self.items();
        let delta = self.binding.remove(&current, id)?;
        let remaining = delta.cast.as_ref().map_or(current.len(), Vec::len);
        self.editor.apply(&delta);
        Ok(current.len() - remaining)
    }
}
