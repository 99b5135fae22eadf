//! Grid snake: a discrete-tick simulation engine with turn arbitration,
//! plus the terminal collaborators that drive and display it.

pub mod arbiter;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod token;
pub mod ui;
