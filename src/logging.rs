//! Diagnostic logging
//!
//! The terminal belongs to the game while it runs, so log output only goes to
//! a file, and only when one is asked for.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Install a plain-text subscriber appending to `path`. Without a path nothing is installed.
pub fn init(path: Option<&Path>, level: LogLevel) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::from(level))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")?;

    Ok(())
}
