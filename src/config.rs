use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::input::Direction;
use crate::snake::Position;

/// Directory name used below the platform config and data directories.
pub const APP_DIR_NAME: &str = "countdown-snake";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Board width in rendering units.
pub const DEFAULT_BOARD_WIDTH: u32 = 500;

/// Board height in rendering units.
pub const DEFAULT_BOARD_HEIGHT: u32 = 500;

/// Side length of one cell in rendering units.
pub const DEFAULT_TILE_SIZE: u32 = 25;

/// Cell the snake head occupies at start and after every restart.
pub const START_CELL: Position = Position { x: 5, y: 5 };

/// Direction of travel at start and after every restart.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Countdown length in seconds.
pub const TIME_LIMIT_SECS: u32 = 60;

/// Simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Countdown tick interval in milliseconds. Tied to wall-clock seconds.
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Derives the cell grid from board dimensions and tile size.
    pub fn from_board(board_width: u32, board_height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(Error::InvalidBoard("tile size must be positive".to_owned()));
        }

        let width = cells_along(board_width / tile_size, "width")?;
        let height = cells_along(board_height / tile_size, "height")?;
        let grid = Self { width, height };

        if !START_CELL.is_within_bounds(grid) {
            return Err(Error::InvalidBoard(format!(
                "{width}x{height} grid does not contain the start cell ({}, {})",
                START_CELL.x, START_CELL.y
            )));
        }

        Ok(grid)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

fn cells_along(cells: u32, axis: &str) -> Result<u16> {
    u16::try_from(cells)
        .map_err(|_| Error::InvalidBoard(format!("grid {axis} of {cells} cells is too large")))
}

/// Resolved runtime configuration for one process.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub tick_interval: Duration,
    pub countdown_interval: Duration,
    pub seed: Option<u64>,
}

/// User-facing settings. Every field is optional; unset fields use defaults.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub board_width: Option<u32>,
    pub board_height: Option<u32>,
    pub tile_size: Option<u32>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Reads settings from an explicit JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &raw)
    }

    /// Reads the settings file from the platform config directory.
    ///
    /// A missing file is not an error and yields default settings.
    pub fn load_default() -> Result<Self> {
        let Some(path) = default_settings_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&path, &raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Error::SettingsRead { path, source }),
        }
    }

    fn parse(path: &Path, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every field set in `overrides` replaced.
    #[must_use]
    pub fn overlay(self, overrides: Self) -> Self {
        Self {
            board_width: overrides.board_width.or(self.board_width),
            board_height: overrides.board_height.or(self.board_height),
            tile_size: overrides.tile_size.or(self.tile_size),
            tick_interval_ms: overrides.tick_interval_ms.or(self.tick_interval_ms),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Validates the settings and fills in defaults.
    pub fn resolve(&self) -> Result<GameConfig> {
        let grid = GridSize::from_board(
            self.board_width.unwrap_or(DEFAULT_BOARD_WIDTH),
            self.board_height.unwrap_or(DEFAULT_BOARD_HEIGHT),
            self.tile_size.unwrap_or(DEFAULT_TILE_SIZE),
        )?;

        let tick_ms = self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS);
        if tick_ms == 0 || tick_ms >= COUNTDOWN_INTERVAL_MS {
            return Err(Error::InvalidTiming(format!(
                "tick interval must be between 1 and {} ms, got {tick_ms}",
                COUNTDOWN_INTERVAL_MS - 1
            )));
        }

        Ok(GameConfig {
            grid,
            tick_interval: Duration::from_millis(tick_ms),
            countdown_interval: Duration::from_millis(COUNTDOWN_INTERVAL_MS),
            seed: self.seed,
        })
    }
}

/// Returns the platform-correct settings file path, if a config dir exists.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}
