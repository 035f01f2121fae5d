use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Raw keys the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Backspace,
    Char(char),
    /// Ctrl+C. Honored in every mode.
    Interrupt,
    /// Any other key; only useful as "press any key".
    Other,
}

impl KeyInput {
    /// Translate a crossterm key event. Releases and repeats are dropped.
    pub fn from_key_event(key_event: KeyEvent) -> Option<Self> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }
        log::debug!(
            "Key event: {:?} with modifiers {:?}",
            key_event.code,
            key_event.modifiers
        );
        let key = match (key_event.modifiers, key_event.code) {
            (m, KeyCode::Char('c' | 'C')) if m.contains(KeyModifiers::CONTROL) => {
                KeyInput::Interrupt
            }
            (_, KeyCode::Up) => KeyInput::Up,
            (_, KeyCode::Down) => KeyInput::Down,
            (_, KeyCode::Enter) => KeyInput::Enter,
            (_, KeyCode::Esc) => KeyInput::Escape,
            (_, KeyCode::Backspace) => KeyInput::Backspace,
            (_, KeyCode::Char(' ')) => KeyInput::Space,
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => KeyInput::Char(c),
            _ => KeyInput::Other,
        };
        Some(key)
    }
}
