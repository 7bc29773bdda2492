use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Reasons a configuration cannot be used to build a game
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid size must be positive")]
    EmptyGrid,
    #[error("grid size {grid_size} exceeds the maximum of {max}")]
    GridTooLarge { grid_size: usize, max: usize },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("a snake of length {length} does not fit behind the center of a {grid_size}x{grid_size} grid")]
    SnakeTooLong { length: usize, grid_size: usize },
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

/// Largest playable board side; two terminal columns per cell must still fit on screen
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid, in cells
    pub grid_size: usize,
    /// Length of the snake after a reset
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Period of the simulation tick
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            food_score: 10,
            tick_interval_ms: 250,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that a game can be laid out with these settings.
    ///
    /// The snake starts with its head in the middle of the grid and its body
    /// extending to the left, so every segment has to land on the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.initial_snake_length - 1 > self.grid_size / 2 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                grid_size: self.grid_size,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
