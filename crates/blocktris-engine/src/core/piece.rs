use serde::{Deserialize, Serialize};

use super::{
    block::BlockColor,
    shape::{Shape, ShapeKind},
};

/// A shape with a color, anchored at `(x, y)` on the board.
///
/// The anchor locates the top-left corner of the shape matrix. `y` may be
/// negative while a tall piece is still partially above the board.
///
/// Movement and rotation return new `Piece` values; the board decides whether
/// the result is placeable.
///
/// # Example
///
/// ```
/// use blocktris_engine::{BlockColor, Piece, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T, BlockColor::Red).moved_to(4, 0);
/// let rotated = piece.down().rotated();
/// assert_eq!(rotated.position(), (4, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: ShapeKind,
    color: BlockColor,
    x: i32,
    y: i32,
    shape: Shape,
}

impl Piece {
    /// Creates a piece from the catalog template of `kind`, anchored at the origin.
    #[must_use]
    pub fn new(kind: ShapeKind, color: BlockColor) -> Self {
        Self::with_shape(kind, kind.template(), color)
    }

    #[must_use]
    pub fn with_shape(kind: ShapeKind, shape: Shape, color: BlockColor) -> Self {
        Self {
            kind,
            color,
            x: 0,
            y: 0,
            shape,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.color
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the board coordinates `(x, y)` of every occupied cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_offsets()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    #[must_use]
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved_to(self.x - 1, self.y)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved_to(self.x + 1, self.y)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved_to(self.x, self.y + 1)
    }

    /// Returns the piece rotated clockwise around its unchanged anchor.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_uses_template_at_origin() {
        let piece = Piece::new(ShapeKind::L, BlockColor::Blue);
        assert_eq!(piece.kind(), ShapeKind::L);
        assert_eq!(piece.color(), BlockColor::Blue);
        assert_eq!(piece.position(), (0, 0));
        assert_eq!(piece.shape(), &ShapeKind::L.template());
    }

    #[test]
    fn test_moves_do_not_touch_original() {
        let piece = Piece::new(ShapeKind::O, BlockColor::Yellow).moved_to(4, 0);
        assert_eq!(piece.left().position(), (3, 0));
        assert_eq!(piece.right().position(), (5, 0));
        assert_eq!(piece.down().position(), (4, 1));
        assert_eq!(piece.position(), (4, 0));
    }

    #[test]
    fn test_occupied_positions_follow_anchor() {
        let piece = Piece::new(ShapeKind::T, BlockColor::Red).moved_to(3, -1);
        let positions = piece.occupied_positions().collect::<Vec<_>>();
        assert_eq!(positions, vec![(3, -1), (4, -1), (5, -1), (4, 0)]);
    }

    #[test]
    fn test_rotated_keeps_anchor_and_color() {
        let piece = Piece::new(ShapeKind::I, BlockColor::Cyan).moved_to(6, 2);
        let rotated = piece.rotated();
        assert_eq!(rotated.position(), (6, 2));
        assert_eq!(rotated.color(), BlockColor::Cyan);
        assert_eq!(rotated.shape().height(), 4);
        assert_eq!(rotated.shape().width(), 1);
        assert_eq!(piece.shape().width(), 4);
    }

    #[test]
    fn test_serialization_shape() {
        let piece = Piece::new(ShapeKind::O, BlockColor::Green).moved_to(4, 18);
        let value = serde_json::to_value(&piece).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "O",
                "color": "green",
                "x": 4,
                "y": 18,
                "shape": [[true, true], [true, true]],
            })
        );
        let parsed: Piece = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, piece);
    }
}
