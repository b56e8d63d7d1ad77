use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action of the preferences panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    Increase,
    Decrease,
    LargeIncrease, // Shift: ten slider steps
    LargeDecrease,
    Toggle, // Enter/Space: flip toggles, cycle dropdowns
    ResetSelected,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Adjust
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Increase,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Decrease,
        (KeyCode::Right, KeyModifiers::NONE) => Action::Increase,
        (KeyCode::Left, KeyModifiers::NONE) => Action::Decrease,
        (KeyCode::Char('L'), KeyModifiers::SHIFT) => Action::LargeIncrease,
        (KeyCode::Char('H'), KeyModifiers::SHIFT) => Action::LargeDecrease,
        (KeyCode::Right, KeyModifiers::SHIFT) => Action::LargeIncrease,
        (KeyCode::Left, KeyModifiers::SHIFT) => Action::LargeDecrease,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Toggle,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::Toggle,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ResetSelected,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_vim_and_arrow_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::MoveDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Up, KeyModifiers::NONE)),
            Action::MoveUp
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Action::LargeIncrease
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Action::None
        );
    }
}
