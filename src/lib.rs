//! Tick Snake - a grid Snake game driven by a fixed-period tick
//!
//! This library provides:
//! - Core game logic with a seedable, synchronously steppable engine (game module)
//! - A cancellable tick timer (driver module)
//! - Keyboard and on-screen button input mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod driver;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
