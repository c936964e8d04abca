use parking_lot::Mutex;
use reel_core::{OutcomeSink, PublishOutcome};

/// Collects every outcome it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    outcomes: Mutex<Vec<PublishOutcome>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<PublishOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .lock()
            .iter()
            .filter(|outcome| !outcome.is_ok())
            .count()
    }
}

impl OutcomeSink for RecordingSink {
    fn emit(&self, outcome: &PublishOutcome) {
        self.outcomes.lock().push(outcome.clone());
    }
}
