use std::fmt;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Opaque identity of one token spawn, unique within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TokenId(u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token-{}", self.0)
    }
}

/// Issues monotonically increasing [`TokenId`]s.
#[derive(Debug, Default)]
pub struct TokenIdGenerator {
    next: u64,
}

impl TokenIdGenerator {
    pub fn next_id(&mut self) -> TokenId {
        let id = TokenId(self.next);
        self.next += 1;
        id
    }
}

/// The collectible currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Token {
    pub position: Position,
    pub id: TokenId,
}

impl Token {
    /// Spawns a token on a cell the snake does not occupy.
    ///
    /// Returns `None` only when the snake covers the whole grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        ids: &mut TokenIdGenerator,
    ) -> Option<Self> {
        let position = spawn_position(rng, bounds, snake)?;
        Some(Self {
            position,
            id: ids.next_id(),
        })
    }
}

/// Draws uniformly random cells until one is free of the snake.
///
/// Each draw picks `x` and `y` independently. There is no retry bound; the
/// loop terminates with probability 1 whenever at least one cell is free.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
