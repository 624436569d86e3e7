use serde::Serialize;

use crate::{Board, Cell, Piece};

use super::game_stats::GameStats;

/// Read-only view of a [`Game`](crate::Game) for renderers.
///
/// Serializes as
/// `{"board": [[null | "<color>", ...], ...], "active": <piece>, "next": <piece>, "game_over": bool, "stats": {...}}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GameSnapshot<'a> {
    pub board: &'a Board,
    pub active: &'a Piece,
    pub next: &'a Piece,
    pub game_over: bool,
    pub stats: &'a GameStats,
}

impl GameSnapshot<'_> {
    /// Board rows with the active piece drawn over the locked cells.
    ///
    /// Piece cells above the top of the board are not shown.
    #[must_use]
    pub fn composed_rows(&self) -> Vec<Vec<Cell>> {
        let mut rows = self
            .board
            .row_iter()
            .map(<[Cell]>::to_vec)
            .collect::<Vec<_>>();
        for (x, y) in self.active.occupied_positions() {
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = Cell::Filled(self.active.color());
            }
        }
        rows
    }
}
