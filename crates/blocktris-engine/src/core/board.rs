use std::iter;

use serde::{Serialize, Serializer};

use crate::PieceCollisionError;

use super::{
    block::{BlockColor, Cell},
    piece::Piece,
    shape::Shape,
};

/// The persistent grid of locked cells.
///
/// Row 0 is the top of the board. The dimensions are fixed at construction;
/// every operation keeps exactly `rows × cols` cells.
///
/// # Coordinates
///
/// Placement checks work with signed `(x, y)` coordinates: `x` is the column
/// and `y` the row. Cells with `y < 0` are above the visible grid and are
/// always treated as free, which lets tall pieces spawn partially off-screen.
///
/// # Example
///
/// ```
/// use blocktris_engine::{BlockColor, Board, Piece, ShapeKind};
///
/// let mut board = Board::new(20, 10);
/// let piece = Piece::new(ShapeKind::O, BlockColor::Yellow).moved_to(4, 18);
///
/// assert!(board.can_place_piece(&piece));
/// board.lock(&piece).unwrap();
/// assert!(!board.can_place_piece(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: Vec<Vec<Cell>>,
}

/// Serialized as a list of rows, top to bottom.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.rows.serialize(serializer)
    }
}

impl Board {
    /// Creates an empty board of `rows × cols` cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            rows: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Fills every cell of `row` except the columns in `holes`.
    ///
    /// Handy for building board fixtures.
    pub fn fill_row_except(&mut self, row: usize, color: BlockColor, holes: &[usize]) {
        for (col, cell) in self.rows[row].iter_mut().enumerate() {
            *cell = if holes.contains(&col) {
                Cell::Empty
            } else {
                Cell::Filled(color)
            };
        }
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(|c| !c.is_empty()))
    }

    /// Number of rows holding at least one locked cell.
    #[must_use]
    pub fn occupied_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.iter().any(|c| !c.is_empty()))
            .count()
    }

    /// Anchor at which new pieces appear: `(cols / 2 - 1, 0)`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn_position(&self) -> (i32, i32) {
        // GameConfig::validate bounds the width well below i32::MAX
        ((self.cols / 2) as i32 - 1, 0)
    }

    /// Returns whether the cell at signed coordinates `(x, y)` can hold a block.
    ///
    /// Columns outside `[0, cols)` and rows at or below the floor are blocked.
    /// Rows above the top (`y < 0`) are free.
    #[must_use]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        let Ok(col) = usize::try_from(x) else {
            return false;
        };
        if col >= self.cols {
            return false;
        }
        match usize::try_from(y) {
            Err(_) => true,
            Ok(row) => self.rows.get(row).is_some_and(|r| r[col].is_empty()),
        }
    }

    /// Returns whether `shape` anchored at `(x, y)` fits the board.
    ///
    /// Every occupied cell must land inside the side walls, above the floor,
    /// and either above the top or on an empty cell.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape
            .occupied_offsets()
            .into_iter()
            .all(|(dx, dy)| self.is_free(x + dx, y + dy))
    }

    #[must_use]
    pub fn can_place_piece(&self, piece: &Piece) -> bool {
        self.can_place(piece.shape(), piece.x(), piece.y())
    }

    /// Writes the piece's color into every occupied cell at its anchor.
    ///
    /// The board is left untouched if the piece does not fit. Cells that are
    /// still above the top are discarded.
    pub fn lock(&mut self, piece: &Piece) -> Result<(), PieceCollisionError> {
        if !self.can_place_piece(piece) {
            return Err(PieceCollisionError);
        }
        for (x, y) in piece.occupied_positions() {
            if let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) {
                self.rows[row][col] = Cell::Filled(piece.color());
            }
        }
        Ok(())
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Remaining rows keep their order and move down; the same number of empty
    /// rows is inserted at the top.
    pub fn clear_full_lines(&mut self) -> usize {
        let height = self.rows.len();
        self.rows.retain(|r| r.iter().any(|c| c.is_empty()));
        let cleared = height - self.rows.len();
        if cleared > 0 {
            let empty = iter::repeat_n(vec![Cell::Empty; self.cols], cleared);
            self.rows.splice(0..0, empty);
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use crate::ShapeKind;

    use super::*;

    const ROWS: usize = 20;
    const COLS: usize = 10;

    fn o_piece(x: i32, y: i32) -> Piece {
        Piece::new(ShapeKind::O, BlockColor::Yellow).moved_to(x, y)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(ROWS, COLS);
        assert_eq!(board.rows(), ROWS);
        assert_eq!(board.cols(), COLS);
        assert!(board.row_iter().flatten().all(|c| c.is_empty()));
        assert_eq!(board.occupied_row_count(), 0);
        assert_eq!(board.cell(ROWS, 0), None);
        assert_eq!(board.cell(0, COLS), None);
    }

    #[test]
    fn test_spawn_position() {
        assert_eq!(Board::new(ROWS, COLS).spawn_position(), (4, 0));
        assert_eq!(Board::new(ROWS, 7).spawn_position(), (2, 0));
    }

    #[test]
    fn test_can_place_inside_empty_board() {
        let board = Board::new(ROWS, COLS);
        assert!(board.can_place(&ShapeKind::O.template(), 4, 0));
        assert!(board.can_place(&ShapeKind::O.template(), 0, 18));
        assert!(board.can_place(&ShapeKind::I.template(), 6, 19));
    }

    #[test]
    fn test_can_place_rejects_walls_and_floor() {
        let board = Board::new(ROWS, COLS);
        let o = ShapeKind::O.template();
        assert!(!board.can_place(&o, -1, 0), "left wall");
        assert!(!board.can_place(&o, 9, 0), "right wall");
        assert!(!board.can_place(&o, 4, 19), "floor");
        assert!(!board.can_place(&ShapeKind::I.template(), 7, 0));
    }

    #[test]
    fn test_can_place_allows_cells_above_top() {
        let board = Board::new(ROWS, COLS);
        let vertical_i = ShapeKind::I.template().rotated();
        assert!(board.can_place(&vertical_i, 0, -3));
        assert!(board.can_place(&vertical_i, 0, -100));
        assert!(!board.can_place(&vertical_i, -1, -3), "walls still apply");
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let mut board = Board::new(ROWS, COLS);
        board.set_cell(10, 5, Cell::Filled(BlockColor::Red));
        let o = ShapeKind::O.template();
        assert!(!board.can_place(&o, 4, 9));
        assert!(!board.can_place(&o, 5, 10));
        assert!(board.can_place(&o, 6, 9));
        assert!(board.can_place(&o, 3, 9));
    }

    #[test]
    fn test_can_place_ignores_unoccupied_shape_cells() {
        let mut board = Board::new(ROWS, COLS);
        // T-shape leaves (0,1) and (2,1) open
        board.set_cell(1, 0, Cell::Filled(BlockColor::Red));
        board.set_cell(1, 2, Cell::Filled(BlockColor::Red));
        assert!(board.can_place(&ShapeKind::T.template(), 0, 0));
    }

    #[test]
    fn test_can_place_exhaustive_against_single_block() {
        let mut board = Board::new(ROWS, COLS);
        board.set_cell(12, 3, Cell::Filled(BlockColor::Blue));
        let shape = ShapeKind::S.template();
        for y in -2..=21 {
            for x in -2..=11 {
                let expected = shape.occupied_offsets().iter().all(|&(dx, dy)| {
                    let (cx, cy) = (x + dx, y + dy);
                    (0..10).contains(&cx) && cy < 20 && (cx, cy) != (3, 12)
                });
                assert_eq!(board.can_place(&shape, x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_lock_writes_color() {
        let mut board = Board::new(ROWS, COLS);
        board.lock(&o_piece(4, 18)).unwrap();
        for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
            assert_eq!(
                board.cell(row, col),
                Some(Cell::Filled(BlockColor::Yellow))
            );
        }
        assert_eq!(board.row_iter().flatten().filter(|c| !c.is_empty()).count(), 4);
    }

    #[test]
    fn test_lock_rejects_invalid_placement_without_mutation() {
        let mut board = Board::new(ROWS, COLS);
        board.lock(&o_piece(4, 18)).unwrap();
        let before = board.clone();
        assert_eq!(board.lock(&o_piece(5, 18)), Err(PieceCollisionError));
        assert_eq!(board.lock(&o_piece(9, 0)), Err(PieceCollisionError));
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_drops_cells_above_top() {
        let mut board = Board::new(ROWS, COLS);
        board.lock(&o_piece(0, -1)).unwrap();
        assert_eq!(board.cell(0, 0), Some(Cell::Filled(BlockColor::Yellow)));
        assert_eq!(board.cell(0, 1), Some(Cell::Filled(BlockColor::Yellow)));
        assert_eq!(board.occupied_row_count(), 1);
    }

    #[test]
    fn test_clear_single_full_row() {
        let mut board = Board::new(ROWS, COLS);
        board.fill_row_except(19, BlockColor::Red, &[]);
        board.fill_row_except(18, BlockColor::Green, &[0]);
        assert_eq!(board.occupied_row_count(), 2);

        assert_eq!(board.clear_full_lines(), 1);

        assert_eq!(board.rows(), ROWS);
        assert_eq!(board.occupied_row_count(), 1);
        assert!(board.row_iter().next().unwrap().iter().all(|c| c.is_empty()));
        // the partial row fell into the bottom row
        assert_eq!(board.cell(19, 0), Some(Cell::Empty));
        assert_eq!(board.cell(19, 1), Some(Cell::Filled(BlockColor::Green)));
    }

    #[test]
    fn test_clear_preserves_order_of_remaining_rows() {
        let mut board = Board::new(ROWS, COLS);
        board.fill_row_except(15, BlockColor::Red, &[1]);
        board.fill_row_except(16, BlockColor::Green, &[]);
        board.fill_row_except(17, BlockColor::Blue, &[2]);
        board.fill_row_except(18, BlockColor::Cyan, &[]);
        board.fill_row_except(19, BlockColor::Orange, &[3]);

        assert_eq!(board.clear_full_lines(), 2);

        assert_eq!(board.cell(17, 0), Some(Cell::Filled(BlockColor::Red)));
        assert_eq!(board.cell(17, 1), Some(Cell::Empty));
        assert_eq!(board.cell(18, 0), Some(Cell::Filled(BlockColor::Blue)));
        assert_eq!(board.cell(18, 2), Some(Cell::Empty));
        assert_eq!(board.cell(19, 0), Some(Cell::Filled(BlockColor::Orange)));
        assert_eq!(board.cell(19, 3), Some(Cell::Empty));
        for row in 0..17 {
            assert!(!board.is_row_full(row));
            assert!(board.row_iter().nth(row).unwrap().iter().all(|c| c.is_empty()));
        }
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::new(ROWS, COLS);
        board.fill_row_except(19, BlockColor::Red, &[9]);
        let before = board.clone();
        assert_eq!(board.clear_full_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new(4, 3);
        for row in 0..4 {
            board.fill_row_except(row, BlockColor::Magenta, &[]);
        }
        assert_eq!(board.clear_full_lines(), 4);
        assert_eq!(board, Board::new(4, 3));
    }

    #[test]
    fn test_is_row_full_out_of_range() {
        let board = Board::new(ROWS, COLS);
        assert!(!board.is_row_full(ROWS));
    }

    #[test]
    fn test_serializes_rows_top_to_bottom() {
        let mut board = Board::new(2, 2);
        board.set_cell(1, 0, Cell::Filled(BlockColor::Red));
        assert_eq!(
            serde_json::to_string(&board).unwrap(),
            "[[null,null],[\"red\",null]]"
        );
    }
}
