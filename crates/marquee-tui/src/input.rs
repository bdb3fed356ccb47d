use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,   // space: pause when running, resume when paused
    StartStop,     // 's'
    Reverse,       // 'r': flip direction
    RateUp,
    RateDown,
    GapUp,
    GapDown,
    ToggleHoverPause,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Playback
        (KeyCode::Char(' '), _) => Action::TogglePause,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::StartStop,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reverse,
        (KeyCode::Left | KeyCode::Right, KeyModifiers::NONE) => Action::Reverse,

        // Live tuning; '+' and '=' share a key on most layouts
        (KeyCode::Char('+' | '='), _) => Action::RateUp,
        (KeyCode::Char('-' | '_'), _) => Action::RateDown,
        (KeyCode::Char(']'), _) => Action::GapUp,
        (KeyCode::Char('['), _) => Action::GapDown,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::ToggleHoverPause,

        _ => Action::None,
    }
}
