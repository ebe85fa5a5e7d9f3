//! Key mapping from terminal events to game commands.

use crate::types::{Command, Direction, PlayerId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
///
/// Letter keys always steer player one. Arrow keys steer player two in
/// two-player mode and player one otherwise.
pub fn map_key(key: KeyEvent, two_players: bool) -> Option<Command> {
    let arrows = if two_players {
        PlayerId::Two
    } else {
        PlayerId::One
    };

    let (player, direction) = match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            (PlayerId::One, Direction::North)
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            (PlayerId::One, Direction::South)
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            (PlayerId::One, Direction::West)
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            (PlayerId::One, Direction::East)
        }

        KeyCode::Up => (arrows, Direction::North),
        KeyCode::Down => (arrows, Direction::South),
        KeyCode::Left => (arrows, Direction::West),
        KeyCode::Right => (arrows, Direction::East),

        KeyCode::Char('p') | KeyCode::Char('P') => return Some(Command::Pause),

        _ => return None,
    };

    Some(Command::Steer { player, direction })
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
