//! Fixed-period driver around an [`Engine`].
//!
//! Input producers never touch the engine. They hold a [`CommandSender`] and
//! enqueue intents; the session drains the queue on its own thread right
//! before deciding whether a tick is due, so every turn request is judged in
//! arrival order against the same arbiter state the next tick will use.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::engine::{Engine, GameObserver, GameState, GameStatus, StepOutcome};
use crate::input::{Direction, GameInput};

/// Mutations that may be requested from outside the tick loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Reset,
}

/// Cloneable handle for enqueueing [`Command`]s.
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: Sender<Command>,
}

impl CommandSender {
    /// Enqueues `command`. Returns false once the session is gone.
    pub fn send(&self, command: Command) -> bool {
        match self.sender.send(command) {
            Ok(()) => true,
            Err(error) => {
                warn!(command = ?error.0, "session dropped, command discarded");
                false
            }
        }
    }
}

/// Translates a player intent into a command, gated on the visible state.
///
/// Turns only apply while running, pause cannot be toggled once the game is
/// over, and restart is only offered after game over. Sound and quit intents
/// belong to the host and yield `None`.
#[must_use]
pub fn command_for_input(input: GameInput, state: &GameState) -> Option<Command> {
    match input {
        GameInput::Direction(direction) if state.status() == GameStatus::Running => {
            Some(Command::Turn(direction))
        }
        GameInput::Pause if !state.game_over => Some(Command::TogglePause),
        GameInput::Restart if state.game_over => Some(Command::Reset),
        _ => None,
    }
}

/// One game session: engine, command queue and tick clock.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    sender: Sender<Command>,
    commands: Receiver<Command>,
    tick_interval: Duration,
    last_tick: Instant,
}

impl Session {
    /// Starts the tick clock at `started_at`.
    #[must_use]
    pub fn new(engine: Engine, started_at: Instant) -> Self {
        let (sender, commands) = mpsc::channel();
        let tick_interval = engine.config().tick_interval();

        Self {
            engine,
            sender,
            commands,
            tick_interval,
            last_tick: started_at,
        }
    }

    /// Returns a handle input producers can enqueue commands through.
    #[must_use]
    pub fn command_sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Applies queued commands, then steps once if a full period has elapsed.
    ///
    /// A late call still produces a single step; missed periods are not
    /// replayed.
    pub fn update(&mut self, now: Instant, observer: &mut dyn GameObserver) -> Option<StepOutcome> {
        self.apply_pending_commands();

        if now.saturating_duration_since(self.last_tick) < self.tick_interval {
            return None;
        }

        self.last_tick = now;
        Some(self.engine.step_with(observer))
    }

    /// Gates `input` against the current state, enqueues the resulting
    /// command and applies it right away, so the next intent in the same
    /// input batch sees its effect. Returns the command, if any.
    pub fn submit(&mut self, input: GameInput) -> Option<Command> {
        let command = command_for_input(input, self.engine.state())?;
        // The session holds its own receiver, so this send cannot fail.
        let _ = self.sender.send(command);
        self.apply_pending_commands();
        Some(command)
    }

    /// Drains the command queue in arrival order.
    pub fn apply_pending_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Turn(direction) => {
                    let _ = self.engine.request_turn(direction);
                }
                Command::TogglePause => self.engine.toggle_pause(),
                Command::Reset => self.engine.reset(),
            }
        }
    }
}
