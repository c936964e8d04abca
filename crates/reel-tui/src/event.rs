//! TUI event types for input and save outcomes.

use crossterm::event::KeyEvent;
use reel_core::PublishOutcome;

/// Application event emitted by input handlers or the outcome bus.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// A dispatched save finished.
    Outcome(PublishOutcome),
}
