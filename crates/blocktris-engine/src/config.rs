//! Named, overridable game parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BlockColor;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 10;
/// Width of one board cell, in terminal columns.
pub const DEFAULT_BLOCK_SIZE: u16 = 2;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Smallest board on which every catalog shape fits at the spawn position.
pub const MIN_ROWS: usize = 2;
pub const MIN_COLS: usize = 5;
pub const MAX_DIMENSION: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must have {}..={} rows, got {_0}", MIN_ROWS, MAX_DIMENSION)]
    Rows(#[error(not(source))] usize),
    #[display("board must have {}..={} columns, got {_0}", MIN_COLS, MAX_DIMENSION)]
    Cols(#[error(not(source))] usize),
    #[display("block size must be at least 1")]
    ZeroBlockSize,
    #[display("tick interval must be at least 1ms")]
    ZeroTickInterval,
    #[display("palette must contain at least one color")]
    EmptyPalette,
}

/// Game parameters.
///
/// Every field has a default matching the classic 20×10 game, so a JSON
/// config only needs the fields it overrides:
///
/// ```
/// use blocktris_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "rows": 12 }"#).unwrap();
/// assert_eq!(config.rows, 12);
/// assert_eq!(config.cols, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub block_size: u16,
    pub palette: Vec<BlockColor>,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            block_size: DEFAULT_BLOCK_SIZE,
            palette: BlockColor::ALL.to_vec(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ROWS..=MAX_DIMENSION).contains(&self.rows) {
            return Err(ConfigError::Rows(self.rows));
        }
        if !(MIN_COLS..=MAX_DIMENSION).contains(&self.cols) {
            return Err(ConfigError::Cols(self.cols));
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}
