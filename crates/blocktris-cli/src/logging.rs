use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;

/// Log destination.
///
/// The terminal belongs to the game screen, so logs only go to a file and
/// nothing is installed without `--log-file`.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[arg(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,
}

impl LogArg {
    pub(crate) fn init(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(())
    }
}
