use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the one-cell `(dx, dy)` step for this direction. `y` grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the host loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    ToggleSound,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// A source of resolved player intents registered by the host.
pub trait InputAdapter {
    /// Returns the next pending intent without blocking, if any.
    fn poll_input(&mut self) -> io::Result<Option<GameInput>>;
}

/// Keyboard adapter reading crossterm key events.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputAdapter for KeyboardInput {
    fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(Some(input));
                }
            }
        }

        Ok(None)
    }
}

/// Maps one key event to a game intent.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(' ') => Some(GameInput::Pause),
        KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(GameInput::Direction(Direction::Up)),
            's' => Some(GameInput::Direction(Direction::Down)),
            'a' => Some(GameInput::Direction(Direction::Left)),
            'd' => Some(GameInput::Direction(Direction::Right)),
            'r' => Some(GameInput::Restart),
            'm' => Some(GameInput::ToggleSound),
            'q' => Some(GameInput::Quit),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Left, Direction::Right));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_headings() {
        let pairs = [
            (KeyCode::Up, KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, KeyCode::Char('A'), Direction::Left),
            (KeyCode::Right, KeyCode::Char('d'), Direction::Right),
        ];

        for (arrow, letter, direction) in pairs {
            let expected = Some(GameInput::Direction(direction));
            assert_eq!(map_key(KeyEvent::from(arrow)), expected);
            assert_eq!(map_key(KeyEvent::from(letter)), expected);
        }
    }

    #[test]
    fn control_keys_map_to_session_intents() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('m'))),
            Some(GameInput::ToggleSound)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Up);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_key(key), None);
    }

    #[test]
    fn direction_serializes_in_upper_case() {
        let json = serde_json::to_string(&Direction::Left).expect("direction should serialize");
        assert_eq!(json, "\"LEFT\"");
    }
}
