//! The record store: single owner of the edited record.

use crate::publish::{PublishDispatcher, PublishHandle};
use log::debug;
use reel_protocol::{Delta, PublishRequest, Record};
use std::sync::Arc;

/// Holds exactly one current record and replaces it on every delta.
///
/// Readers get `Arc` snapshots; `apply` installs a new record instead of
/// mutating the old one, so a snapshot never observes a partial merge.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    current: Arc<Record>,
    revision: u64,
}

impl RecordStore {
    /// Store seeded with `record`.
    pub fn new(record: Record) -> Self {
        Self {
            current: Arc::new(record),
            revision: 0,
        }
    }

    /// Shallow-merge `delta` over the current record and install the result.
    ///
    /// An empty delta leaves the store untouched.
    pub fn apply(&mut self, delta: &Delta) -> Arc<Record> {
        if delta.is_empty() {
            return self.current();
        }
        let next = self.current.apply(delta);
        self.current = Arc::new(next);
        self.revision += 1;
        debug!(
            "applied delta (revision={}, fields={:?})",
            self.revision,
            delta.fields()
        );
        self.current()
    }

    /// Snapshot of the record at the time of the call.
    pub fn current(&self) -> Arc<Record> {
        Arc::clone(&self.current)
    }

    /// Number of non-empty deltas applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot the record with `publish` and hand it to the dispatcher.
    ///
    /// The store does not wait for, or react to, the outcome.
    pub fn publish(&self, publish: bool, dispatcher: &PublishDispatcher) -> PublishHandle {
        let request = PublishRequest::new(self.current.as_ref().clone(), publish);
        dispatcher.dispatch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use pretty_assertions::assert_eq;
    use reel_protocol::{Delta, Record};

    #[test]
    fn apply_merges_and_bumps_revision() {
        let mut store = RecordStore::default();
        let delta = Delta {
            title: Some("Inception".to_string()),
            ..Delta::default()
        };
        let record = store.apply(&delta);
        assert_eq!(record.title, "Inception");
        assert_eq!(store.current().title, "Inception");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn snapshots_are_unaffected_by_later_deltas() {
        let mut store = RecordStore::default();
        let before = store.current();
        store.apply(&Delta {
            upcoming: Some(false),
            description: Some("dream heist".to_string()),
            ..Delta::default()
        });
        assert_eq!(*before, Record::default());
        assert!(!store.current().upcoming);
    }

    #[test]
    fn empty_delta_is_a_no_op() {
        let mut store = RecordStore::default();
        store.apply(&Delta::default());
        assert_eq!(store.revision(), 0);
        assert_eq!(*store.current(), Record::default());
    }

    #[test]
    fn shallow_merge_changes_exactly_the_delta_keys() {
        let mut seeded = Record::default();
        seeded.title = "Heat".to_string();
        seeded.rating = 4.0;
        let mut store = RecordStore::new(seeded.clone());
        store.apply(&Delta {
            rating: Some(5.0),
            ..Delta::default()
        });
        let mut expected = seeded;
        expected.rating = 5.0;
        assert_eq!(*store.current(), expected);
    }
}
