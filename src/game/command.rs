//! Single-letter command parsing.
//!
//! Input is trimmed, lower-cased and reduced to its first character. Movement has two
//! bindings each for up and left so both AZERTY (`zqsd`) and QWERTY (`wasd`) work.

use super::grid::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Help,
    Quit,
    Unknown,
}

impl Command {
    pub fn from_key(key: char) -> Command {
        match key {
            'z' | 'w' => Command::Move(Direction::Up),
            's' => Command::Move(Direction::Down),
            'q' | 'a' => Command::Move(Direction::Left),
            'd' => Command::Move(Direction::Right),
            'r' => Command::Restart,
            'h' => Command::Help,
            'x' => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

pub fn parse_command(raw: &str) -> Command {
    raw.trim()
        .chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
        .map(Command::from_key)
        .unwrap_or(Command::Unknown)
}
