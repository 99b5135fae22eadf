use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Reasons a [`GameConfig`](crate::config::GameConfig) cannot start a game.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid side length must be at least 1")]
    EmptyGrid,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("score per token must be greater than zero")]
    ZeroScoreIncrement,
    #[error("initial snake must contain at least one segment")]
    EmptySnake,
    #[error("initial snake segment {position} lies outside the {side}x{side} grid")]
    SegmentOutOfBounds { position: Position, side: u16 },
    #[error("initial snake occupies {0} more than once")]
    OverlappingSegments(Position),
    #[error("initial snake segments {from} and {to} are not adjacent")]
    DisjointSegments { from: Position, to: Position },
    #[error("initial snake leaves no free cell for a token")]
    NoFreeCell,
    #[error("initial heading {0:?} points the head into the second segment")]
    HeadingIntoBody(Direction),
    #[error("token position {0} is outside the grid or on the snake")]
    InvalidTokenPosition(Position),
}

/// Errors surfaced by the host application around the core.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
