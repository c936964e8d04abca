//! Library entry point for the Reel TUI.
//!
//! Provides a reusable [`run`] function that drives a pre-configured
//! [`Editor`] from a Ratatui terminal form.

mod app;
mod event;
mod outcome_bus;
mod ui;

pub use outcome_bus::OutcomeBus;

use anyhow::anyhow;
use app::{App, KeyAction};
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use reel_core::{Editor, WidgetEvent};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::mpsc;

/// Configuration for the Reel TUI session.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Description of the active publisher (shown in header).
    pub publisher: String,
}

/// Launch the Reel TUI against a pre-configured editor.
///
/// The caller is responsible for:
/// - Creating the [`Editor`] with `with_sink(Arc::new(outcomes.clone()))`
/// - Initializing logging (e.g. `env_logger`) before calling `run`
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run(mut editor: Editor, outcomes: OutcomeBus, config: TuiConfig) -> anyhow::Result<()> {
    let mut app = App::new(&editor.current(), config.publisher);

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());
    spawn_outcome_forwarder(outcomes.subscribe(), tx.clone());
    info!("tui started (revision={})", editor.revision());

    loop {
        let record = editor.current();
        terminal.draw(|frame| ui::draw(frame, &app, &record))?;
        let event = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
        if handle_app_event(event, &mut editor, &mut app) {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    info!(
        "tui stopped (revision={}, saves={})",
        editor.revision(),
        editor.saves_dispatched()
    );
    Ok(())
}

/// Dispatch a UI event and return true when the app should exit.
fn handle_app_event(event: AppEvent, editor: &mut Editor, app: &mut App) -> bool {
    match event {
        AppEvent::Input(key) => {
            if key.kind == KeyEventKind::Release {
                return false;
            }
            match app.handle_key(key, &editor.current()) {
                KeyAction::Quit => return true,
                KeyAction::Ignore => {}
                KeyAction::Emit(events) => {
                    for event in events {
                        apply_widget_event(event, editor, app);
                    }
                }
            }
            false
        }
        AppEvent::Outcome(outcome) => {
            debug!(
                "save outcome received (seq={}, ok={})",
                outcome.seq,
                outcome.is_ok()
            );
            app.record_outcome(&outcome);
            false
        }
        AppEvent::Tick => false,
    }
}

/// Feed one widget event to the editor and refresh the form from the record.
fn apply_widget_event(event: WidgetEvent, editor: &mut Editor, app: &mut App) {
    match editor.dispatch(event) {
        Ok(Some(handle)) => app.save_started(handle.publish()),
        Ok(None) => {}
        Err(err) => {
            warn!("widget event rejected (error={})", err);
            app.push_status(err.to_string());
        }
    }
    app.sync_from(&editor.current());
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event {
                        let _ = sender.send(AppEvent::Input(key)).await;
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            let _ = sender.send(AppEvent::Tick).await;
        }
    });
}

/// Spawn a task forwarding save outcomes into the UI event channel.
fn spawn_outcome_forwarder(
    mut outcomes: broadcast::Receiver<reel_core::PublishOutcome>,
    sender: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        loop {
            match outcomes.recv().await {
                Ok(outcome) => {
                    if sender.send(AppEvent::Outcome(outcome)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("outcome stream lagged (skipped={})", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{handle_app_event, App};
    use crate::event::AppEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use reel_core::Editor;

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn key_presses_reach_the_record() {
        let mut editor = Editor::default().with_autosave_on_blur(false);
        let mut app = App::new(&editor.current(), "mock");
        for ch in "Up".chars() {
            assert!(!handle_app_event(press(KeyCode::Char(ch)), &mut editor, &mut app));
        }
        assert_eq!(editor.current().title, "Up");
        assert!(handle_app_event(press(KeyCode::Esc), &mut editor, &mut app));
    }

    #[test]
    fn invalid_input_shows_error_without_changing_record() {
        let mut editor = Editor::default().with_autosave_on_blur(false);
        let mut app = App::new(&editor.current(), "mock");
        while app.focused() != reel_protocol::FieldId::Rating {
            handle_app_event(press(KeyCode::Tab), &mut editor, &mut app);
        }
        handle_app_event(press(KeyCode::Char('x')), &mut editor, &mut app);
        assert_eq!(editor.current().rating, 0.0);
        assert!(app.status.contains("rating"));
    }
}
