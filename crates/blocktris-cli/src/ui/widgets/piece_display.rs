use blocktris_engine::{Cell, MAX_SHAPE_SIDE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// A single piece centered in a fixed-size panel, ignoring its anchor.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a Piece>,
    block_size: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(block_size: u16) -> Self {
        Self {
            piece: None,
            block_size,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(MAX_SHAPE_SIDE, self.block_size)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(MAX_SHAPE_SIDE, 1) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let piece_area = area.centered(
            Constraint::Length(super::cells_to_u16(shape.width(), self.block_size)),
            Constraint::Length(super::cells_to_u16(shape.height(), 1)),
        );

        let col_constraints = (0..shape.width()).map(|_| Constraint::Length(self.block_size));
        let row_constraints = (0..shape.height()).map(|_| Constraint::Length(1));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::from_cell(Cell::Filled(piece.color()), false);
        let empty_block = BlockDisplay::from_cell(Cell::Empty, false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied((x, y)) {
                    Widget::render(&occupied_block, grid_cell, buf);
                } else {
                    Widget::render(&empty_block, grid_cell, buf);
                }
            }
        }
    }
}
