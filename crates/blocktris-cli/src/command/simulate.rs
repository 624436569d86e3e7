use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use blocktris_engine::{Game, Ticker};
use rand::Rng;

use crate::{command::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Stop after this many ticks even if the game is still running
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Output file for the final snapshot (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(game_arg: &GameArg, arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg { max_ticks, output } = arg;

    let config = game_arg.load_config()?;
    let seed = game_arg.seed();
    eprintln!("Simulating with seed {seed}");
    tracing::info!(%seed, rows = config.rows, cols = config.cols, "starting simulation");

    let mut game = Game::with_seed(&config, seed);
    let ticks = simulate(&mut game, config.tick_interval(), *max_ticks);
    eprintln!(
        "Stopped after {ticks} ticks: {} pieces locked, {} lines cleared{}",
        game.stats().locked_pieces(),
        game.stats().cleared_lines(),
        if game.is_game_over() { ", game over" } else { "" }
    );

    Output::save_json(&game.snapshot(), output.clone())
}

/// Drives `game` with a virtual clock that advances one tick interval per
/// step, so no time actually passes.
///
/// Returns the number of ticks processed.
fn simulate<R>(game: &mut Game<R>, interval: Duration, max_ticks: Option<u64>) -> u64
where
    R: Rng,
{
    let mut now = Instant::now();
    let mut ticker = Ticker::new(interval, now);
    let mut ticks = 0;
    while ticker.is_armed() && max_ticks.is_none_or(|max| ticks < max) {
        now += interval;
        if ticker.drive(game, now).is_some() {
            ticks += 1;
        }
    }
    ticks
}
