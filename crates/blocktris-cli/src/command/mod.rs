use std::path::PathBuf;

use anyhow::Context as _;
use blocktris_engine::{GameConfig, PieceSeed};
use clap::{Parser, Subcommand};
use rand::Rng as _;

use self::{play::PlayArg, simulate::SimulateArg};
use crate::{logging::LogArg, util};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    game: GameArg,
    #[command(flatten)]
    log: LogArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a game without input until it is over and print the final snapshot
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Game parameters shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Game config file (JSON); missing fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Number of board rows
    #[arg(long, global = true)]
    rows: Option<usize>,
    /// Number of board columns
    #[arg(long, global = true)]
    cols: Option<usize>,
    /// Width of one board cell, in terminal columns
    #[arg(long, global = true)]
    block_size: Option<u16>,
    /// Milliseconds between gravity ticks
    #[arg(long, global = true)]
    tick_ms: Option<u64>,
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[arg(long, global = true)]
    seed: Option<PieceSeed>,
}

impl GameArg {
    /// Reads the config file, if any, and applies the command line overrides.
    pub(crate) fn load_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        config.validate().context("Invalid game config")?;
        Ok(config)
    }

    pub(crate) fn seed(&self) -> PieceSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    args.log.init()?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&args.game, &arg)?,
        Mode::Simulate(arg) => simulate::run(&args.game, &arg)?,
    }
    Ok(())
}
