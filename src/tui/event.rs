//! Event handling for the session screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FitTrackError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the session.
    Start,
    /// Pause or resume the countdown.
    TogglePause,
    /// Skip the current phase.
    Skip,
    /// Stop and save the session, or leave once it has finished.
    Stop,
    /// Stop and leave immediately.
    Quit,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Duration) -> Result<Option<Action>, FitTrackError> {
    if !event::poll(timeout).map_err(|e| FitTrackError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| FitTrackError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(action_for(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Char('s') | KeyCode::Right => Some(Action::Skip),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Stop),
        _ => None,
    }
}
