//! Pure key routing: `(Mode, KeyInput) → Command`.
//!
//! Each mode defines which keys it accepts. Everything else is `Ignore`.
//! Ctrl+C is the one key every mode honors.

use crate::core::state::Mode;
use crate::tui::event::KeyInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveSelection(isize),
    Select,
    ShowDescription,
    HideDescription,
    Back,
    Interrupt,
    Ignore,
}

pub fn dispatch(mode: Mode, key: KeyInput) -> Command {
    if key == KeyInput::Interrupt {
        return Command::Interrupt;
    }
    match mode {
        Mode::Browsing => dispatch_browsing(key),
        Mode::ShowingDescription => match key {
            KeyInput::Space | KeyInput::Escape => Command::HideDescription,
            _ => Command::Ignore,
        },
        // Questions and actions read their own input; menu keys stay inert.
        Mode::AskingQuestions | Mode::RunningAction | Mode::Exited => Command::Ignore,
    }
}

fn dispatch_browsing(key: KeyInput) -> Command {
    match key {
        KeyInput::Up => Command::MoveSelection(-1),
        KeyInput::Down => Command::MoveSelection(1),
        KeyInput::Enter => Command::Select,
        KeyInput::Space => Command::ShowDescription,
        KeyInput::Escape => Command::Back,
        // Reserved
        KeyInput::Backspace => Command::Ignore,
        _ => Command::Ignore,
    }
}
