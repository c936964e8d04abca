use async_trait::async_trait;
use parking_lot::Mutex;
use reel_core::{PublishError, Publisher};
use reel_protocol::{PostReceipt, PublishRequest};

/// Accepts every request and keeps a copy of it.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    requests: Mutex<Vec<PublishRequest>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Option<PublishRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn post(&self, request: PublishRequest) -> Result<PostReceipt, PublishError> {
        let receipt = PostReceipt::accepted(request.publish);
        self.requests.lock().push(request);
        Ok(receipt)
    }
}

/// Rejects every request with a fixed transport error.
#[derive(Debug, Clone)]
pub struct FailingPublisher {
    message: String,
}

impl FailingPublisher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Publisher for FailingPublisher {
    async fn post(&self, _request: PublishRequest) -> Result<PostReceipt, PublishError> {
        Err(PublishError::Transport(self.message.clone()))
    }
}
