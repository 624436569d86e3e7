use std::path::PathBuf;

use blocktris_engine::{GameConfig, GameSnapshot, PieceSeed};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{command::GameArg, tui::Tui, util};

use self::app::PlayApp;

mod app;

const DEFAULT_SNAPSHOT_DIR: &str = "./data/snapshots/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Save the final game state to a file when the game ends
    #[arg(long)]
    save_snapshot: bool,
    /// Directory to save snapshot files
    #[arg(long, default_value = DEFAULT_SNAPSHOT_DIR)]
    snapshot_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            save_snapshot: false,
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
        }
    }
}

/// Contents of a saved snapshot file.
#[derive(Debug, Serialize)]
struct SavedGame<'a> {
    saved_at: DateTime<Utc>,
    seed: PieceSeed,
    config: &'a GameConfig,
    snapshot: GameSnapshot<'a>,
}

pub(crate) fn run(game_arg: &GameArg, arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        save_snapshot,
        snapshot_dir,
    } = arg;

    let config = game_arg.load_config()?;
    let seed = game_arg.seed();
    tracing::info!(%seed, rows = config.rows, cols = config.cols, "starting game");

    let mut app = PlayApp::new(&config, seed);
    Tui::new().run(&mut app)?;

    let stats = app.game().stats();
    tracing::info!(
        locked_pieces = stats.locked_pieces(),
        cleared_lines = stats.cleared_lines(),
        game_over = app.game().is_game_over(),
        "session ended"
    );

    if *save_snapshot {
        let saved_at = Utc::now();
        let data = SavedGame {
            saved_at,
            seed,
            config: &config,
            snapshot: app.game().snapshot(),
        };
        let path = util::save_timestamped_json(snapshot_dir, "blocktris", saved_at, &data)?;
        eprintln!("Snapshot saved to {}", path.display());
    }

    Ok(())
}
