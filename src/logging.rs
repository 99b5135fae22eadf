use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::data_dir;
use crate::error::Error;

const LOG_FILE_NAME: &str = "based-snake.log";

/// Returns the default log file location.
#[must_use]
pub fn default_log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

/// Installs a global `tracing` subscriber appending to `path`.
///
/// The terminal belongs to the game screen, so logs never go to stdout.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| Error::Logging(error.to_string()))
}
