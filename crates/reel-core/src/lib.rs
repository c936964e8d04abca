//! Editing core for Reel records.
//!
//! This crate owns the record store, the field binder that turns widget
//! events into deltas, identifier allocation for list items, and the publish
//! pipeline that posts record snapshots to a [`Publisher`].

pub mod api;
pub mod binder;
pub mod editor;
pub mod error;
pub mod event;
pub mod http;
pub mod ids;
pub mod publish;
pub mod store;

pub use api::MockApi;
pub use binder::{Binding, FieldBinder, ListBinding, ScalarBinding};
pub use editor::{Editor, FieldHandle, ListHandle, ScalarHandle};
pub use error::{BindError, PublishError, ReelCoreError};
pub use event::WidgetEvent;
pub use http::{HttpPublisher, publisher_from_config};
pub use ids::IdAllocator;
/// Publisher seam and outcome reporting.
pub use publish::{
    LogSink, OutcomeSink, PublishDispatcher, PublishHandle, PublishOutcome, Publisher,
};
pub use store::RecordStore;
