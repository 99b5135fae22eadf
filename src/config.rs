use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{ConfigError, Error};
use crate::input::Direction;
use crate::snake::Position;

const APP_DIR_NAME: &str = "based-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default side length of the square play field.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Default period between simulation ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Default score awarded per collected token.
pub const DEFAULT_SCORE_PER_TOKEN: u32 = 10;

/// Default number of segments in a fresh snake.
pub const DEFAULT_SNAKE_LENGTH: usize = 3;

/// Heading every fresh game starts with.
pub const DEFAULT_INITIAL_HEADING: Direction = Direction::Right;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `side` cells per axis.
    #[must_use]
    pub fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Tunable values for one game session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub grid_size: GridSize,
    pub tick_interval_ms: u64,
    pub score_per_token: u32,
    /// Starting body, head first.
    pub initial_snake: Vec<Position>,
    pub initial_heading: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::square(DEFAULT_GRID_SIZE),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            score_per_token: DEFAULT_SCORE_PER_TOKEN,
            initial_snake: centered_snake(DEFAULT_GRID_SIZE),
            initial_heading: DEFAULT_INITIAL_HEADING,
        }
    }
}

impl GameConfig {
    /// Returns the tick period as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Applies every value present in `overrides` on top of `self`.
    ///
    /// Changing the grid side without naming an explicit starting body
    /// re-centres the default snake on the new grid.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(side) = overrides.grid_size {
            self.grid_size = GridSize::square(side);
            if overrides.initial_snake.is_none() {
                self.initial_snake = centered_snake(side);
            }
        }
        if let Some(tick_interval_ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms;
        }
        if let Some(score_per_token) = overrides.score_per_token {
            self.score_per_token = score_per_token;
        }
        if let Some(initial_snake) = overrides.initial_snake {
            self.initial_snake = initial_snake;
        }
        if let Some(initial_heading) = overrides.initial_heading {
            self.initial_heading = initial_heading;
        }
        self
    }

    /// Checks that a game can start from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size.width == 0 || self.grid_size.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.score_per_token == 0 {
            return Err(ConfigError::ZeroScoreIncrement);
        }

        let Some(&head) = self.initial_snake.first() else {
            return Err(ConfigError::EmptySnake);
        };

        let mut seen = HashSet::with_capacity(self.initial_snake.len());
        for &position in &self.initial_snake {
            if !position.is_within_bounds(self.grid_size) {
                return Err(ConfigError::SegmentOutOfBounds {
                    position,
                    side: self.grid_size.width,
                });
            }
            if !seen.insert(position) {
                return Err(ConfigError::OverlappingSegments(position));
            }
        }

        for pair in self.initial_snake.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(ConfigError::DisjointSegments {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        if self.initial_snake.len() >= self.grid_size.total_cells() {
            return Err(ConfigError::NoFreeCell);
        }

        if self.initial_snake.get(1) == Some(&head.offset(self.initial_heading)) {
            return Err(ConfigError::HeadingIntoBody(self.initial_heading));
        }

        Ok(())
    }
}

/// Partial configuration read from a config file or the command line.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub grid_size: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub score_per_token: Option<u32>,
    pub initial_snake: Option<Vec<Position>>,
    pub initial_heading: Option<Direction>,
}

impl ConfigOverrides {
    /// Loads overrides from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads overrides from the platform config file.
    ///
    /// Returns empty overrides when that file does not exist.
    pub fn load_default() -> Result<Self, Error> {
        let path = default_config_path();
        match Self::load(&path) {
            Err(Error::Io(error)) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the platform-correct data directory for logs.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Builds the default horizontal snake, head at the grid centre, facing right.
#[must_use]
pub fn centered_snake(side: u16) -> Vec<Position> {
    let center = i32::from(side / 2);
    (0..DEFAULT_SNAKE_LENGTH as i32)
        .map(|offset| Position {
            x: center - offset,
            y: center,
        })
        .collect()
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub token: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

/// Blue snake on a dark board.
pub const THEME_BASED: Theme = Theme {
    snake_head: Color::Rgb(37, 99, 235),
    snake_body: Color::Rgb(59, 130, 246),
    token: Color::Rgb(0, 82, 255),
    play_bg: Color::Black,
    border_fg: Color::Rgb(96, 165, 250),
    hud_score: Color::Rgb(96, 165, 250),
    hud_muted: Color::DarkGray,
    menu_title: Color::Rgb(59, 130, 246),
};

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Snake head glyph.
pub const GLYPH_SNAKE_HEAD: &str = "██";

/// Snake body glyph.
pub const GLYPH_SNAKE_BODY: &str = "▓▓";

/// Token glyph.
pub const GLYPH_TOKEN: &str = "()";

/// Sleep between frames of the host loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::{ConfigOverrides, GameConfig, GridSize, centered_snake};
    use crate::error::ConfigError;
    use crate::input::Direction;
    use crate::snake::Position;

    #[test]
    fn default_config_matches_classic_layout() {
        let config = GameConfig::default();

        assert_eq!(config.grid_size, GridSize::square(20));
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.score_per_token, 10);
        assert_eq!(
            config.initial_snake,
            vec![
                Position { x: 10, y: 10 },
                Position { x: 9, y: 10 },
                Position { x: 8, y: 10 },
            ]
        );
        assert_eq!(config.initial_heading, Direction::Right);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn grid_override_recentres_default_snake() {
        let config = GameConfig::default().with_overrides(ConfigOverrides {
            grid_size: Some(8),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.initial_snake, centered_snake(8));
        assert_eq!(config.initial_snake[0], Position { x: 4, y: 4 });
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn explicit_snake_survives_grid_override() {
        let snake = vec![Position { x: 1, y: 0 }, Position { x: 0, y: 0 }];
        let config = GameConfig::default().with_overrides(ConfigOverrides {
            grid_size: Some(5),
            initial_snake: Some(snake.clone()),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.initial_snake, snake);
    }

    #[test]
    fn partial_json_overrides_only_named_values() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{ "tick_interval_ms": 90, "initial_heading": "UP" }"#)
                .expect("overrides should parse");
        let config = GameConfig::default().with_overrides(overrides);

        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.initial_heading, Direction::Up);
        assert_eq!(config.grid_size, GridSize::square(20));
        assert_eq!(config.score_per_token, 10);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let parsed = serde_json::from_str::<ConfigOverrides>(r#"{ "grid": 4 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_rejects_broken_configs() {
        let base = GameConfig::default();

        let mut config = base.clone();
        config.grid_size = GridSize::square(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        let mut config = base.clone();
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));

        let mut config = base.clone();
        config.initial_snake.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));

        let mut config = base.clone();
        config.initial_snake = vec![Position { x: 20, y: 3 }];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SegmentOutOfBounds { .. })
        ));

        let mut config = base.clone();
        config.initial_snake = vec![Position { x: 3, y: 3 }, Position { x: 5, y: 3 }];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DisjointSegments { .. })
        ));

        let mut config = base.clone();
        config.initial_heading = Direction::Left;
        assert_eq!(
            config.validate(),
            Err(ConfigError::HeadingIntoBody(Direction::Left))
        );

        let mut config = base;
        config.grid_size = GridSize::square(1);
        config.initial_snake = vec![Position { x: 0, y: 0 }];
        assert_eq!(config.validate(), Err(ConfigError::NoFreeCell));
    }

    #[test]
    fn validation_rejects_overlapping_segments() {
        let config = GameConfig {
            initial_snake: vec![
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
                Position { x: 3, y: 3 },
            ],
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::OverlappingSegments(Position { x: 3, y: 3 }))
        );
    }
}
