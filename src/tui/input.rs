//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Freeze or unfreeze the display.
    TogglePause,
    /// Clear all plot history.
    Reset,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;

    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if state.show_help {
        return handle_help(state, key);
    }
    handle_normal_mode(state, key)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('H') | KeyCode::Char('q') => {
            state.show_help = false;
            state.help_scroll = 0;
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            // Clamped during render
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys when no popup is open.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char(' ') | KeyCode::Char('p') => KeyAction::TogglePause,
        KeyCode::Char('r') => KeyAction::Reset,

        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.zoom_in();
            state.status_message = Some(format!("Growing view: {} samples", state.grow_view));
            KeyAction::None
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.zoom_out();
            state.status_message = Some(format!("Growing view: {} samples", state.grow_view));
            KeyAction::None
        }

        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.show_help = true;
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new("mock", 100.0)
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut s = state();
        assert_eq!(handle_key(&mut s, key(KeyCode::Char('q'))), KeyAction::None);
        assert!(s.show_quit_confirm);

        assert_eq!(handle_key(&mut s, key(KeyCode::Esc)), KeyAction::None);
        assert!(!s.show_quit_confirm);

        handle_key(&mut s, key(KeyCode::Char('q')));
        assert_eq!(handle_key(&mut s, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_immediately() {
        let mut s = state();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut s, ctrl_c), KeyAction::Quit);

        s.show_help = true;
        assert_eq!(handle_key(&mut s, ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_pause_and_reset_actions() {
        let mut s = state();
        assert_eq!(
            handle_key(&mut s, key(KeyCode::Char(' '))),
            KeyAction::TogglePause
        );
        assert_eq!(
            handle_key(&mut s, key(KeyCode::Char('p'))),
            KeyAction::TogglePause
        );
        assert_eq!(handle_key(&mut s, key(KeyCode::Char('r'))), KeyAction::Reset);
    }

    #[test]
    fn test_zoom_keys_update_view_and_status() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('+')));
        assert_eq!(s.grow_view, 50.0);
        assert_eq!(s.status_message.as_deref(), Some("Growing view: 50 samples"));

        handle_key(&mut s, key(KeyCode::Char('-')));
        handle_key(&mut s, key(KeyCode::Char('-')));
        assert_eq!(s.grow_view, 200.0);

        // Any other key clears the message
        handle_key(&mut s, key(KeyCode::Char('x')));
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_help_popup_captures_keys() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('?')));
        assert!(s.show_help);

        // Pause is not triggered while help is open
        assert_eq!(handle_key(&mut s, key(KeyCode::Char(' '))), KeyAction::None);

        handle_key(&mut s, key(KeyCode::Down));
        handle_key(&mut s, key(KeyCode::Down));
        assert_eq!(s.help_scroll, 2);
        handle_key(&mut s, key(KeyCode::Up));
        assert_eq!(s.help_scroll, 1);

        handle_key(&mut s, key(KeyCode::Esc));
        assert!(!s.show_help);
        assert_eq!(s.help_scroll, 0);
    }
}
