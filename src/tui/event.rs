//! Event handling for the dashboard.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::VisionError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or stop tracking.
    ToggleTracking,
    /// Take a break now.
    StartBreak,
    /// End the current break early.
    EndBreak,
    /// Start the selected exercise.
    StartExercise,
    /// Select the next exercise.
    NextExercise,
    /// Select the previous exercise.
    PreviousExercise,
    /// Stop the running exercise.
    StopExercise,
    /// Reset today's screen time.
    Reset,
    /// Show key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::ToggleTracking),
        KeyCode::Char('b') => Some(Action::StartBreak),
        KeyCode::Char('e') => Some(Action::EndBreak),
        KeyCode::Char('x') | KeyCode::Enter => Some(Action::StartExercise),
        KeyCode::Char('n' | 'j') | KeyCode::Down => Some(Action::NextExercise),
        KeyCode::Char('p' | 'k') | KeyCode::Up => Some(Action::PreviousExercise),
        KeyCode::Char('s') => Some(Action::StopExercise),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, VisionError> {
    if event::poll(timeout).map_err(|e| VisionError::Config(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| VisionError::Config(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(map_key(key));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::ToggleTracking));
        assert_eq!(map_key(key(KeyCode::Char('b'))), Some(Action::StartBreak));
        assert_eq!(map_key(key(KeyCode::Char('x'))), Some(Action::StartExercise));
        assert_eq!(map_key(key(KeyCode::Char('n'))), Some(Action::NextExercise));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(Action::Quit));
    }
}
