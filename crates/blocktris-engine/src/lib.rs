//! Game-state engine for a single-player falling-block puzzle.
//!
//! The crate is split in two layers:
//!
//! - [`core`]: plain data structures ([`Board`], [`Shape`], [`Piece`], [`Cell`])
//!   and the placement/rotation/line-clear rules that operate on them.
//! - [`engine`]: the [`Game`] state machine, the random [`ShapeCatalog`], the
//!   fixed-interval [`Ticker`] and the read-only [`GameSnapshot`] handed to
//!   renderers.
//!
//! Board dimensions, block size, palette and tick interval are collected in
//! [`GameConfig`].
//!
//! # Example
//!
//! ```
//! use blocktris_engine::{Command, Game, GameConfig, PieceSeed};
//!
//! let config = GameConfig::default();
//! let mut game = Game::with_seed(&config, PieceSeed::from_bytes([7; 16]));
//!
//! game.apply(Command::MoveLeft);
//! game.apply(Command::Rotate);
//! while !game.is_game_over() {
//!     game.tick();
//! }
//!
//! let snapshot = game.snapshot();
//! assert!(snapshot.game_over);
//! ```

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board or its walls")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    #[display("piece colliding when applying command")]
    PieceCollision(PieceCollisionError),
    #[display("game is over")]
    GameOver,
}

impl From<PieceCollisionError> for CommandError {
    fn from(err: PieceCollisionError) -> Self {
        Self::PieceCollision(err)
    }
}
