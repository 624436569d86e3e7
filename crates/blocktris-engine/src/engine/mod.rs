//! Game state machine and the pieces around it.
//!
//! - [`Game`] - board, active piece, next piece and status; `tick` and `apply`
//! - [`ShapeCatalog`] - random pieces from an injectable RNG
//! - [`PieceSeed`] - seed for deterministic piece generation
//! - [`Ticker`] - fixed-interval clock deciding when `tick` is due
//! - [`GameSnapshot`] - read-only, serializable view for renderers
//! - [`GameStats`] - per-game counters
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] from a [`GameConfig`](crate::GameConfig)
//! 2. Forward player input as [`Command`]s to [`Game::apply`]
//! 3. Call [`Game::tick`] whenever the [`Ticker`] says a tick is due
//! 4. A piece that cannot fall any further locks, full rows clear and the
//!    next piece spawns
//! 5. Repeat until the spawned piece collides ([`GameStatus::GameOver`])

pub use self::{catalog::*, command::*, game::*, game_stats::*, snapshot::*, ticker::*};

mod catalog;
mod command;
mod game;
mod game_stats;
mod snapshot;
mod ticker;
