//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven one tick at a time, so it can be stepped synchronously in tests.

pub mod config;
pub mod engine;
pub mod heading;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, TickOutcome};
pub use heading::Heading;
pub use state::{Cell, CollisionType, GameEnd, GameState, RunState, Snake};
