//! Key event interpretation.
//!
//! Maps a raw key event to one action. The interpreter holds no state and
//! never touches the status message; it only names what the keystroke
//! means. The app decides what to do with the answer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a keystroke means to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Enter: run the submission pipeline.
    Submit,
    /// Escape: toggle the overlay away and clear the field.
    Cancel,
    /// An ordinary edit appending one character.
    Insert(char),
    /// Remove the character before the cursor.
    Backspace,
    /// Ctrl-C: leave the application.
    Quit,
    /// Anything else, including key release and repeat events.
    Ignored,
}

/// Interpret a single key event.
///
/// Only `Press` events are acted on. Release and repeat events map to
/// [`InputAction::Ignored`], so a held Escape cannot fire twice and no
/// platform-default side effect sneaks in behind the overlay.
pub fn interpret_key(key_event: KeyEvent) -> InputAction {
    if key_event.kind != KeyEventKind::Press {
        return InputAction::Ignored;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => InputAction::Quit,
            _ => InputAction::Ignored,
        };
    }

    match key_event.code {
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Char(c) => InputAction::Insert(c),
        _ => InputAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits() {
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Enter)),
            InputAction::Submit
        );
    }

    #[test]
    fn test_escape_cancels() {
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Esc)),
            InputAction::Cancel
        );
    }

    #[test]
    fn test_plain_characters_are_edits() {
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Char('q'))),
            InputAction::Insert('q')
        );
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Backspace)),
            InputAction::Backspace
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key_event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(interpret_key(key_event), InputAction::Quit);
    }

    #[test]
    fn test_other_control_chords_are_ignored() {
        let key_event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(interpret_key(key_event), InputAction::Ignored);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key_event = KeyEvent::from(KeyCode::Esc);
        key_event.kind = KeyEventKind::Release;
        assert_eq!(interpret_key(key_event), InputAction::Ignored);
    }

    #[test]
    fn test_unhandled_keys_are_ignored() {
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Tab)),
            InputAction::Ignored
        );
        assert_eq!(
            interpret_key(KeyEvent::from(KeyCode::Up)),
            InputAction::Ignored
        );
    }
}
