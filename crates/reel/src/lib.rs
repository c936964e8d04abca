//! Public SDK surface for Reel.
//!
//! This crate re-exports the editing building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use reel_config as config;
pub use reel_core as core;
/// Re-export for convenience.
pub use reel_protocol as protocol;

pub use reel_core::{Editor, MockApi, PublishHandle, Publisher, WidgetEvent};
pub use reel_protocol::{CastId, CastMember, Delta, FieldId, FieldValue, Record};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder()
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    }
    log::debug!("reel logging initialized");
}
