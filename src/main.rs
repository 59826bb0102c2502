use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use countdown_snake::config::{GameConfig, Settings};
use countdown_snake::driver::{Driver, Flow};
use countdown_snake::game::GameState;
use countdown_snake::input::InputHandler;
use countdown_snake::logging::{default_log_path, init_file_logger};
use countdown_snake::terminal_runtime::TerminalSession;
use log::info;
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Snake against a sixty second clock")]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Board width in rendering units.
    #[arg(long)]
    board_width: Option<u32>,

    /// Board height in rendering units.
    #[arg(long)]
    board_height: Option<u32>,

    /// Rendering units per grid cell.
    #[arg(long)]
    tile_size: Option<u32>,

    /// Simulation tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_interval_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            board_width: self.board_width,
            board_height: self.board_height,
            tile_size: self.tile_size,
            tick_interval_ms: self.tick_interval_ms,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_file_logger(&log_path, cli.log_level) {
        eprintln!("Logging disabled: {error}");
    }

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("countdown-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> countdown_snake::Result<()> {
    let file_settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };
    let config = file_settings.overlay(cli.overrides()).resolve()?;

    info!(
        "starting on a {}x{} grid, tick {:?}",
        config.grid.width, config.grid.height, config.tick_interval
    );

    run(&config)
}

fn run(config: &GameConfig) -> countdown_snake::Result<()> {
    let state = match config.seed {
        Some(seed) => GameState::new_with_seed(config.grid, seed),
        None => GameState::new(config.grid),
    };

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut driver = Driver::new(state, config, Instant::now());

    loop {
        session.draw(driver.state())?;

        let timeout = driver
            .next_deadline()
            .saturating_duration_since(Instant::now());
        if let Some(game_input) = input.poll_input(timeout)?
            && driver.handle_input(game_input) == Flow::Quit
        {
            break;
        }

        driver.advance(Instant::now());
    }

    info!("quit with highest score {}", driver.state().highest_score());

    Ok(())
}
