//! Publishing: the persistence seam and its dispatch.
//!
//! Every save runs as its own background task carrying a snapshot taken at
//! dispatch time. Overlapping saves are neither coalesced nor ordered; each
//! outcome is reported to the [`OutcomeSink`] and through its
//! [`PublishHandle`].

use crate::error::PublishError;
use async_trait::async_trait;
use log::{debug, info, warn};
use reel_protocol::{PostReceipt, PublishRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[async_trait]
/// Persistence collaborator receiving saves and publishes.
pub trait Publisher: Send + Sync {
    /// Deliver the full record plus publish flag.
    async fn post(&self, request: PublishRequest) -> Result<PostReceipt, PublishError>;
}

/// Result of one dispatched save.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    /// Dispatch sequence number, starting at 1.
    pub seq: u64,
    /// The publish flag the request carried.
    pub publish: bool,
    /// Receipt on success, the failure otherwise.
    pub result: Result<PostReceipt, PublishError>,
}

impl PublishOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Receives every publish outcome.
pub trait OutcomeSink: Send + Sync {
    fn emit(&self, outcome: &PublishOutcome);
}

/// Sink that only logs outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutcomeSink for LogSink {
    fn emit(&self, outcome: &PublishOutcome) {
        match &outcome.result {
            Ok(receipt) => info!(
                "content updated (seq={}, publish={}, receipt_id={})",
                outcome.seq, outcome.publish, receipt.id
            ),
            Err(err) => warn!(
                "save failed (seq={}, publish={}, error={})",
                outcome.seq, outcome.publish, err
            ),
        }
    }
}

/// Awaitable handle for a dispatched save.
#[derive(Debug)]
pub struct PublishHandle {
    seq: u64,
    publish: bool,
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Running(JoinHandle<PublishOutcome>),
    Done(PublishOutcome),
}

impl PublishHandle {
    /// Sequence number of the dispatch.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Publish flag the request carried.
    pub fn publish(&self) -> bool {
        self.publish
    }

    /// Wait for the save to finish.
    pub async fn outcome(self) -> PublishOutcome {
        match self.state {
            HandleState::Done(outcome) => outcome,
            HandleState::Running(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(err) => PublishOutcome {
                    seq: self.seq,
                    publish: self.publish,
                    result: Err(PublishError::Aborted(err.to_string())),
                },
            },
        }
    }
}

/// Spawns saves against a publisher and reports their outcomes.
pub struct PublishDispatcher {
    publisher: Arc<dyn Publisher>,
    sink: Arc<dyn OutcomeSink>,
    last_seq: AtomicU64,
}

impl PublishDispatcher {
    /// Dispatcher reporting to `sink`.
    pub fn new(publisher: Arc<dyn Publisher>, sink: Arc<dyn OutcomeSink>) -> Self {
        Self {
            publisher,
            sink,
            last_seq: AtomicU64::new(0),
        }
    }

    /// Replace the outcome sink for later dispatches.
    pub fn set_sink(&mut self, sink: Arc<dyn OutcomeSink>) {
        self.sink = sink;
    }

    /// Number of saves dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.last_seq.load(Ordering::Relaxed)
    }

    /// Start posting `request` in the background.
    ///
    /// Outside a Tokio runtime the save fails immediately; the failure is still
    /// reported to the sink.
    pub fn dispatch(&self, request: PublishRequest) -> PublishHandle {
        let seq = self.last_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let publish = request.publish;
        debug!(
            "dispatching save (seq={}, publish={}, cast_len={})",
            seq,
            publish,
            request.record.cast.len()
        );

        let Ok(runtime) = Handle::try_current() else {
            let outcome = PublishOutcome {
                seq,
                publish,
                result: Err(PublishError::Unavailable(
                    "no async runtime to run the save".to_string(),
                )),
            };
            self.sink.emit(&outcome);
            return PublishHandle {
                seq,
                publish,
                state: HandleState::Done(outcome),
            };
        };

        let publisher = Arc::clone(&self.publisher);
        let sink = Arc::clone(&self.sink);
        let handle = runtime.spawn(async move {
            let result = publisher.post(request).await;
            let outcome = PublishOutcome {
                seq,
                publish,
                result,
            };
            sink.emit(&outcome);
            outcome
        });
        PublishHandle {
            seq,
            publish,
            state: HandleState::Running(handle),
        }
    }
}
