use std::iter;

use blocktris_engine::{Cell, GameSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// The board grid with the active piece drawn over the locked cells.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    rows: Vec<Vec<Cell>>,
    cols: usize,
    block_size: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &GameSnapshot<'_>, block_size: u16) -> Self {
        Self {
            rows: snapshot.composed_rows(),
            cols: snapshot.board.cols(),
            block_size,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(self.cols, self.block_size)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.rows.len(), 1) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..self.cols).map(|_| Constraint::Length(self.block_size));
        let row_constraints = (0..self.rows.len()).map(|_| Constraint::Length(1));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, &self.rows) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                BlockDisplay::from_cell(*cell, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blocktris_engine::{BlockColor, Board, Piece, ShapeKind};

    use super::*;
    use crate::ui::widgets::color;

    #[test]
    fn test_renders_locked_cells_and_active_piece() {
        let mut board = Board::new(3, 5);
        board.set_cell(2, 0, Cell::Filled(BlockColor::Blue));
        let active = Piece::new(ShapeKind::O, BlockColor::Yellow).moved_to(3, 0);
        let next = Piece::new(ShapeKind::I, BlockColor::Cyan);
        let stats = Default::default();
        let snapshot = GameSnapshot {
            board: &board,
            active: &active,
            next: &next,
            game_over: false,
            stats: &stats,
        };

        let display = BoardDisplay::new(&snapshot, 2);
        assert_eq!((display.width(), display.height()), (10, 3));

        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        display.render(buf.area, &mut buf);

        // each board cell spans two terminal columns
        assert_eq!(buf[(0, 2)].bg, color::BLUE);
        assert_eq!(buf[(1, 2)].bg, color::BLUE);
        assert_eq!(buf[(6, 0)].bg, color::YELLOW);
        assert_eq!(buf[(9, 1)].bg, color::YELLOW);
        assert_eq!(buf[(5, 1)].bg, color::BLACK);
        assert_eq!(buf[(2, 2)].bg, color::BLACK);
    }

    #[test]
    fn test_border_adds_margin() {
        let board = Board::new(20, 10);
        let piece = Piece::new(ShapeKind::T, BlockColor::Red);
        let stats = Default::default();
        let snapshot = GameSnapshot {
            board: &board,
            active: &piece,
            next: &piece,
            game_over: false,
            stats: &stats,
        };
        let display = BoardDisplay::new(&snapshot, 3).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (32, 22));
    }
}
