//! In-process mock of the content API.

use crate::error::PublishError;
use crate::publish::Publisher;
use async_trait::async_trait;
use log::info;
use parking_lot::Mutex;
use reel_config::MockConfig;
use reel_protocol::{PostReceipt, PublishRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Publisher that accepts every request after an optional delay.
///
/// Accepted requests are kept in memory so callers can inspect what was
/// sent. Switching it to failing mode makes every call return
/// [`PublishError::Unavailable`] without recording anything.
#[derive(Debug, Default)]
pub struct MockApi {
    latency: Duration,
    failing: AtomicBool,
    history: Mutex<Vec<PublishRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock configured from the `publisher.mock` block.
    pub fn from_config(config: &MockConfig) -> Self {
        let api = Self::new().with_latency(Duration::from_millis(config.latency_ms));
        api.set_failing(config.fail);
        api
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Toggle failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::Relaxed)
    }

    /// Requests accepted so far, oldest first.
    pub fn history(&self) -> Vec<PublishRequest> {
        self.history.lock().clone()
    }
}

#[async_trait]
impl Publisher for MockApi {
    async fn post(&self, request: PublishRequest) -> Result<PostReceipt, PublishError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_failing() {
            return Err(PublishError::Unavailable(
                "mock api is in failing mode".to_string(),
            ));
        }
        let receipt = PostReceipt::accepted(request.publish);
        info!(
            "mock api accepted record (receipt_id={}, publish={}, title_len={})",
            receipt.id,
            request.publish,
            request.record.title.len()
        );
        self.history.lock().push(request);
        Ok(receipt)
    }
}
