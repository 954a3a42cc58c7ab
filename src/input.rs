use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::components::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

/// Maps a key press to a game command. Arrow keys and vi keys both steer.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Turn(Direction::Right)),
        _ => None,
    }
}
