use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{Board, CommandError, GameConfig, Piece, PieceCollisionError};

use super::{
    catalog::{PieceSeed, ShapeCatalog},
    command::{Command, CommandOutcome},
    game_stats::GameStats,
    snapshot::GameSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum GameStatus {
    Falling,
    GameOver,
}

/// What a call to [`Game::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The active piece fell one row.
    Moved,
    /// The active piece was locked and the next piece spawned.
    Locked { cleared_lines: usize },
    /// The active piece was locked and the next piece could not spawn.
    ToppedOut { cleared_lines: usize },
    /// The game was already over.
    Ignored,
}

/// The game state machine.
///
/// Owns the board, the active and next pieces, the catalog pieces are drawn
/// from and the per-game statistics. While the status is
/// [`GameStatus::Falling`] the active piece always fits the board; once the
/// status becomes [`GameStatus::GameOver`] nothing changes any more.
///
/// Gravity is driven from outside: each call to [`Game::tick`] is one step.
/// Player input goes through [`Game::apply`].
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    board: Board,
    active: Piece,
    next: Piece,
    catalog: ShapeCatalog<R>,
    stats: GameStats,
    status: GameStatus,
}

impl Game<Pcg32> {
    /// Creates a game with an empty board and a randomly seeded catalog.
    ///
    /// `config` is expected to have been validated with
    /// [`GameConfig::validate`].
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_catalog(config, ShapeCatalog::new(config.palette.clone()))
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(config: &GameConfig, seed: PieceSeed) -> Self {
        Self::with_catalog(
            config,
            ShapeCatalog::with_seed(seed, config.palette.clone()),
        )
    }
}

impl<R> Game<R>
where
    R: Rng,
{
    pub fn with_catalog(config: &GameConfig, catalog: ShapeCatalog<R>) -> Self {
        Self::from_board(Board::new(config.rows, config.cols), catalog)
    }

    /// Starts a game on a prepared board.
    ///
    /// The first draw becomes the active piece and the second the next one.
    /// If the active piece cannot spawn, the game is over from the start.
    pub fn from_board(board: Board, mut catalog: ShapeCatalog<R>) -> Self {
        let (x, y) = board.spawn_position();
        let active = catalog.random_piece().moved_to(x, y);
        let next = catalog.random_piece();
        let status = if board.can_place_piece(&active) {
            GameStatus::Falling
        } else {
            tracing::info!("no room for the first piece");
            GameStatus::GameOver
        };
        Self {
            board,
            active,
            next,
            catalog,
            stats: GameStats::new(),
            status,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    /// The piece that spawns after the active one locks.
    ///
    /// Its anchor is not meaningful until it spawns.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            board: &self.board,
            active: &self.active,
            next: &self.next,
            game_over: self.is_game_over(),
            stats: &self.stats,
        }
    }

    /// Advances the game by one gravity step.
    ///
    /// Moves the active piece down one row if it fits. Otherwise locks it,
    /// clears full rows and spawns the next piece; if that piece does not
    /// fit, the game is over.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Ignored;
        }
        self.stats.record_tick();

        let down = self.active.down();
        if self.board.can_place_piece(&down) {
            self.active = down;
            return TickOutcome::Moved;
        }

        if let Err(err) = self.board.lock(&self.active) {
            tracing::warn!(%err, piece = ?self.active, "active piece does not fit the board");
            self.status = GameStatus::GameOver;
            return TickOutcome::ToppedOut { cleared_lines: 0 };
        }
        let cleared_lines = self.board.clear_full_lines();
        self.stats.record_lock(cleared_lines);
        tracing::debug!(
            kind = %self.active.kind(),
            x = self.active.x(),
            y = self.active.y(),
            cleared_lines,
            "piece locked"
        );

        if self.spawn_next() {
            TickOutcome::Locked { cleared_lines }
        } else {
            tracing::info!(
                locked_pieces = self.stats.locked_pieces(),
                cleared_lines = self.stats.cleared_lines(),
                ticks = self.stats.ticks(),
                "game over"
            );
            TickOutcome::ToppedOut { cleared_lines }
        }
    }

    /// Single entry point for player input.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let result = match command {
            Command::MoveLeft => self.try_move_left(),
            Command::MoveRight => self.try_move_right(),
            Command::SoftDrop => self.try_soft_drop(),
            Command::Rotate => self.try_rotate(),
        };
        match result {
            Ok(()) => CommandOutcome::Applied,
            Err(CommandError::PieceCollision(_)) => CommandOutcome::Blocked,
            Err(CommandError::GameOver) => CommandOutcome::Ignored,
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.set_active_piece(self.active.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.set_active_piece(self.active.right())
    }

    /// Moves the active piece down one row. Never locks it.
    pub fn try_soft_drop(&mut self) -> Result<(), CommandError> {
        self.set_active_piece(self.active.down())
    }

    /// Rotates the active piece clockwise around its anchor, without kicks.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.set_active_piece(self.active.rotated())
    }

    /// Replaces the active piece if it fits the board.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), CommandError> {
        if self.is_game_over() {
            return Err(CommandError::GameOver);
        }
        if !self.board.can_place_piece(&piece) {
            return Err(PieceCollisionError.into());
        }
        self.active = piece;
        Ok(())
    }

    /// Promotes the next piece to the spawn position and draws a new next.
    ///
    /// Returns `false`, and ends the game, when the spawned piece collides.
    fn spawn_next(&mut self) -> bool {
        let (x, y) = self.board.spawn_position();
        let next = self.catalog.random_piece();
        self.active = std::mem::replace(&mut self.next, next).moved_to(x, y);
        if self.board.can_place_piece(&self.active) {
            return true;
        }
        self.status = GameStatus::GameOver;
        false
    }
}
