use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tick_snake::game::{GameConfig, GameEngine};
use tick_snake::logging::{self, LogLevel};
use tick_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tick_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width and height of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Append diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbosity of the log file
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref(), cli.log_level)?;
    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::with_engine(engine);
    human_mode.run().await?;

    Ok(())
}
