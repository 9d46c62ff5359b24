use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    ToggleSelected,
    ToggleAll,
    BrightnessUp,
    BrightnessDown,
    TemperatureUp,
    TemperatureDown,
    Refresh,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::ToggleSelected),
        KeyCode::Char('g' | 'G') => Some(Action::ToggleAll),
        KeyCode::Char('+') => Some(Action::BrightnessUp),
        KeyCode::Char('-') => Some(Action::BrightnessDown),
        KeyCode::Char('n') => Some(Action::TemperatureUp),
        KeyCode::Char('m') => Some(Action::TemperatureDown),
        KeyCode::Char('r' | 'R') => Some(Action::Refresh),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
