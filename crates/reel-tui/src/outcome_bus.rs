//! Broadcast bus carrying save outcomes from publish tasks to the UI loop.

use log::debug;
use reel_core::{OutcomeSink, PublishOutcome};
use tokio::sync::broadcast;

/// Broadcast-backed outcome sink for the embedded editor.
#[derive(Clone, Debug)]
pub struct OutcomeBus {
    sender: broadcast::Sender<PublishOutcome>,
}

impl OutcomeBus {
    /// Create a new bus with the given channel buffer size.
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer);
        debug!("tui outcome bus initialized (buffer={})", buffer);
        Self { sender }
    }

    /// Subscribe to the outcome stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PublishOutcome> {
        self.sender.subscribe()
    }
}

impl OutcomeSink for OutcomeBus {
    fn emit(&self, outcome: &PublishOutcome) {
        let _ = self.sender.send(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::OutcomeBus;
    use pretty_assertions::assert_eq;
    use reel_core::{OutcomeSink, PublishOutcome};
    use reel_protocol::PostReceipt;

    #[tokio::test]
    async fn subscribers_receive_emitted_outcomes() {
        let bus = OutcomeBus::new(8);
        let mut rx = bus.subscribe();
        let outcome = PublishOutcome {
            seq: 3,
            publish: true,
            result: Ok(PostReceipt::accepted(true)),
        };
        bus.emit(&outcome);
        assert_eq!(rx.recv().await.expect("outcome"), outcome);
    }
}
