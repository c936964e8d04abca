//! Test helpers shared across Reel crates.

pub mod publisher;
pub mod record;
pub mod sink;

pub use publisher::{FailingPublisher, RecordingPublisher};
pub use record::{attributes, member};
pub use sink::RecordingSink;
