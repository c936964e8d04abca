//! Wire and data model types for Reel records, deltas, and publish requests.

mod delta;
mod error;
mod field;
mod record;

pub use delta::Delta;
pub use error::FieldError;
pub use field::{FieldId, FieldKind, FieldValue};
pub use record::{Attributes, CastId, CastMember, Record};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload handed to a publisher: the full record plus the publish flag.
///
/// Serializes flat, so the record fields and `publish` share one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Snapshot of the record at dispatch time.
    #[serde(flatten)]
    pub record: Record,
    /// True for an explicit publish, false for an implicit save.
    pub publish: bool,
}

impl PublishRequest {
    /// Pair a record snapshot with a publish flag.
    pub fn new(record: Record, publish: bool) -> Self {
        Self { record, publish }
    }
}

/// Acknowledgement returned by a publisher after a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    /// Identifier assigned by the receiving side.
    pub id: Uuid,
    /// Time the request was accepted.
    pub received_at: DateTime<Utc>,
    /// Echo of the publish flag carried by the request.
    pub published: bool,
}

impl PostReceipt {
    /// Build a fresh receipt for a request accepted now.
    pub fn accepted(published: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            published,
        }
    }
}
