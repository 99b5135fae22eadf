use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use based_snake::audio::SoundEffects;
use based_snake::config::{ConfigOverrides, FRAME_INTERVAL_MS, GameConfig, THEME_BASED};
use based_snake::engine::Engine;
use based_snake::error::Error;
use based_snake::input::{GameInput, InputAdapter, KeyboardInput};
use based_snake::logging;
use based_snake::renderer;
use based_snake::session::Session;
use based_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use based_snake::ui::hud::HudInfo;
use clap::Parser;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "based-snake", version, about = "Collect tokens and grow your snake")]
struct Cli {
    /// JSON file with config overrides (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible token placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with sound effects off.
    #[arg(long)]
    mute: bool,

    /// Where to write the log file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            grid_size: self.grid_size,
            tick_interval_ms: self.tick_ms,
            ..ConfigOverrides::default()
        }
    }
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(error) = logging::init(&log_path) {
        eprintln!("Logging disabled: {error}");
    }

    let config = resolve_config(&cli)?;
    let engine = match cli.seed {
        Some(seed) => Engine::new_with_seed(config, seed)?,
        None => Engine::new(config)?,
    };

    install_panic_hook();
    run(engine, !cli.mute)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, Error> {
    let file_overrides = match &cli.config {
        Some(path) => ConfigOverrides::load(path)?,
        None => ConfigOverrides::load_default()?,
    };

    let config = GameConfig::default()
        .with_overrides(file_overrides)
        .with_overrides(cli.overrides());
    config.validate()?;
    Ok(config)
}

fn run(engine: Engine, sound_enabled: bool) -> Result<(), Error> {
    let mut terminal = TerminalSession::enter()?;
    let mut keyboard = KeyboardInput;
    let mut sound = SoundEffects::terminal_bell(sound_enabled);
    let mut session = Session::new(engine, Instant::now());
    let bounds = session.engine().config().grid_size;

    info!(
        grid = bounds.width,
        tick_ms = session.tick_interval().as_millis() as u64,
        "session started"
    );

    loop {
        let hud_info = HudInfo {
            sound_enabled: sound.is_enabled(),
            theme: &THEME_BASED,
        };
        terminal.draw(|frame| renderer::render(frame, session.state(), bounds, &hud_info))?;

        while let Some(input) = keyboard.poll_input()? {
            match input {
                GameInput::Quit => {
                    info!(score = session.state().score, "session ended");
                    return Ok(());
                }
                GameInput::ToggleSound => {
                    let enabled = sound.toggle();
                    info!(enabled, "sound toggled");
                }
                other => {
                    if let Some(command) = session.submit(other) {
                        debug!(?command, "input applied");
                    }
                }
            }
        }

        session.update(Instant::now(), &mut sound);
        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }
}
