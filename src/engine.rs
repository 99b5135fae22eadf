use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::arbiter::DirectionArbiter;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::token::{Token, TokenIdGenerator};

/// High-level gameplay state derived from the pause and game-over flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, leaving nowhere to place a token.
    BoardFull,
}

/// What a single [`Engine::step`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Paused or over; nothing changed.
    Skipped,
    Moved,
    TokenCollected,
    GameOver(GameOverReason),
}

/// Read-only view of one game session, handed to renderers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading committed on the last applied tick.
    pub heading: Direction,
    pub token: Token,
    pub score: u32,
    pub game_over: bool,
    pub is_paused: bool,
    pub game_over_reason: Option<GameOverReason>,
    /// Ticks applied since the last reset, including the one that ended the game.
    pub tick_count: u64,
}

impl GameState {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.is_paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }
}

/// Receives events fired synchronously from inside [`Engine::step_with`].
pub trait GameObserver {
    /// A token was collected on this tick.
    fn token_collected(&mut self) {}

    /// The game just ended.
    fn game_over(&mut self, _reason: GameOverReason) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// Owns and advances the game state one tick at a time.
pub struct Engine {
    config: GameConfig,
    state: GameState,
    arbiter: DirectionArbiter,
    token_ids: TokenIdGenerator,
    rng: StdRng,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("arbiter", &self.arbiter)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine seeded from system entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a deterministic engine whose first token sits at `token_position`.
    pub fn from_parts(
        config: GameConfig,
        token_position: Position,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut engine = Self::new_with_seed(config, seed)?;
        if !token_position.is_within_bounds(engine.config.grid_size)
            || engine.state.snake.occupies(token_position)
        {
            return Err(ConfigError::InvalidTokenPosition(token_position));
        }

        engine.state.token.position = token_position;
        Ok(engine)
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut token_ids = TokenIdGenerator::default();
        let state = initial_state(&config, &mut rng, &mut token_ids)?;

        Ok(Self {
            arbiter: DirectionArbiter::new(config.initial_heading),
            config,
            state,
            token_ids,
            rng,
        })
    }

    /// Returns the current state for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Heading the next tick will move in.
    #[cfg(test)]
    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.arbiter.pending()
    }

    /// Forwards a turn request to the direction arbiter.
    ///
    /// Reversals and second turns within one tick are silently dropped.
    pub fn request_turn(&mut self, heading: Direction) -> bool {
        self.arbiter.request_turn(heading)
    }

    /// Advances one tick without an observer.
    pub fn step(&mut self) -> StepOutcome {
        self.step_with(&mut NoopObserver)
    }

    /// Advances one tick, notifying `observer` of anything that happened.
    pub fn step_with(&mut self, observer: &mut dyn GameObserver) -> StepOutcome {
        if self.state.game_over || self.state.is_paused {
            return StepOutcome::Skipped;
        }

        let heading = self.arbiter.pending();
        let next_head = self.state.snake.head().offset(heading);

        if !next_head.is_within_bounds(self.config.grid_size) {
            self.state.tick_count += 1;
            return self.end_game(GameOverReason::WallCollision, observer);
        }

        // Checked against the full pre-move body, tail included.
        if self.state.snake.occupies(next_head) {
            self.state.tick_count += 1;
            return self.end_game(GameOverReason::SelfCollision, observer);
        }

        self.state.snake.push_head(next_head);

        let collected = next_head == self.state.token.position;
        if collected {
            self.state.score = self.state.score.saturating_add(self.config.score_per_token);
            debug!(
                token = %self.state.token.id,
                score = self.state.score,
                length = self.state.snake.len(),
                "token collected"
            );
            observer.token_collected();
        } else {
            self.state.snake.pop_tail();
        }

        self.arbiter.tick();
        self.state.heading = self.arbiter.committed();
        self.state.tick_count += 1;

        if !collected {
            return StepOutcome::Moved;
        }

        match Token::spawn(
            &mut self.rng,
            self.config.grid_size,
            &self.state.snake,
            &mut self.token_ids,
        ) {
            Some(token) => {
                self.state.token = token;
                StepOutcome::TokenCollected
            }
            None => self.end_game(GameOverReason::BoardFull, observer),
        }
    }

    /// Flips the pause flag. Allowed in every state.
    pub fn toggle_pause(&mut self) {
        self.state.is_paused = !self.state.is_paused;
        debug!(paused = self.state.is_paused, "pause toggled");
    }

    /// Starts a fresh game from the configured initial layout.
    pub fn reset(&mut self) {
        self.arbiter = DirectionArbiter::new(self.config.initial_heading);
        self.state = initial_state(&self.config, &mut self.rng, &mut self.token_ids)
            .expect("validated config always leaves a free cell");
        debug!(token = %self.state.token.id, "game reset");
    }

    fn end_game(&mut self, reason: GameOverReason, observer: &mut dyn GameObserver) -> StepOutcome {
        self.state.game_over = true;
        self.state.game_over_reason = Some(reason);
        info!(
            ?reason,
            score = self.state.score,
            length = self.state.snake.len(),
            ticks = self.state.tick_count,
            "game over"
        );
        observer.game_over(reason);
        StepOutcome::GameOver(reason)
    }
}

fn initial_state(
    config: &GameConfig,
    rng: &mut StdRng,
    token_ids: &mut TokenIdGenerator,
) -> Result<GameState, ConfigError> {
    let snake = Snake::from_segments(config.initial_snake.clone());
    let token =
        Token::spawn(rng, config.grid_size, &snake, token_ids).ok_or(ConfigError::NoFreeCell)?;

    Ok(GameState {
        snake,
        heading: config.initial_heading,
        token,
        score: 0,
        game_over: false,
        is_paused: false,
        game_over_reason: None,
        tick_count: 0,
    })
}
