//! Identifier allocation for repeatable list items.

use log::debug;
use reel_protocol::{CastId, Record};

/// Monotonic source of cast identifiers.
///
/// Identifiers are never handed out twice, so a freshly created item cannot
/// collide with any item currently in the list. Once `u64::MAX` has been
/// used the allocator is exhausted and hands out nothing.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdAllocator {
    /// Allocator starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator starting above every identifier already in `record`.
    pub fn after(record: &Record) -> Self {
        let mut allocator = Self::new();
        allocator.observe(record);
        allocator
    }

    /// Hand out the next identifier, or `None` when exhausted.
    pub fn next_id(&mut self) -> Option<CastId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(CastId(id))
    }

    /// Skip past identifiers that entered the record from elsewhere.
    pub fn observe(&mut self, record: &Record) {
        let (Some(CastId(max)), Some(next)) = (record.max_cast_id(), self.next) else {
            return;
        };
        if max >= next {
            self.next = max.checked_add(1);
            debug!(
                "advancing id allocator (from={}, to={:?})",
                next, self.next
            );
        }
    }
}
