use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Longest side of a shape matrix, in cells.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Upper bound on the occupied cells of a shape.
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Enum representing the catalog entry a shape was drawn from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum ShapeKind {
    /// T-shape.
    T = 0,
    /// O-shape.
    O = 1,
    /// I-shape.
    I = 2,
    /// S-shape.
    S = 3,
    /// Z-shape.
    Z = 4,
    /// L-shape.
    L = 5,
    /// J-shape.
    J = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::T,
        Self::O,
        Self::I,
        Self::S,
        Self::Z,
        Self::L,
        Self::J,
    ];

    /// Returns a fresh copy of the template matrix for this kind.
    #[must_use]
    pub fn template(self) -> Shape {
        let cells = TEMPLATES[self as usize]
            .iter()
            .map(|row| row.iter().map(|&c| c == 1).collect())
            .collect();
        Shape { cells }
    }
}

const TEMPLATES: [&[&[u8]]; ShapeKind::LEN] = [
    // T-shape
    &[&[1, 1, 1], &[0, 1, 0]],
    // O-shape
    &[&[1, 1], &[1, 1]],
    // I-shape
    &[&[1, 1, 1, 1]],
    // S-shape
    &[&[1, 1, 0], &[0, 1, 1]],
    // Z-shape
    &[&[0, 1, 1], &[1, 1, 0]],
    // L-shape
    &[&[1, 1, 1], &[1, 0, 0]],
    // J-shape
    &[&[1, 1, 1], &[0, 0, 1]],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no rows")]
    NoRows,
    #[display("shape row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("shape is {width}x{height}, each side must be 1..={}", MAX_SHAPE_SIDE)]
    BadSize { width: usize, height: usize },
    #[display("shape has no occupied cells")]
    NoOccupiedCells,
}

/// Rectangular matrix of occupied/unoccupied cells.
///
/// Row 0 is the top row. Every shape is 1 to 4 cells wide and tall and has
/// at least one occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl TryFrom<Vec<Vec<bool>>> for Shape {
    type Error = ShapeError;

    fn try_from(cells: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Shape> for Vec<Vec<bool>> {
    fn from(shape: Shape) -> Self {
        shape.cells
    }
}

impl Shape {
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Result<Self, ShapeError> {
        let Some(first) = cells.first() else {
            return Err(ShapeError::NoRows);
        };
        let width = first.len();
        for (row, row_cells) in cells.iter().enumerate() {
            if row_cells.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    len: row_cells.len(),
                    expected: width,
                });
            }
        }
        let height = cells.len();
        if !(1..=MAX_SHAPE_SIDE).contains(&width) || !(1..=MAX_SHAPE_SIDE).contains(&height) {
            return Err(ShapeError::BadSize { width, height });
        }
        if !cells.iter().flatten().any(|&c| c) {
            return Err(ShapeError::NoOccupiedCells);
        }
        Ok(Self { cells })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_occupied(&self, (dx, dy): (usize, usize)) -> bool {
        self.cells
            .get(dy)
            .and_then(|row| row.get(dx))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Returns the `(dx, dy)` offsets of the occupied cells, row by row.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_offsets(&self) -> ArrayVec<(i32, i32), MAX_SHAPE_CELLS> {
        // sides are at most MAX_SHAPE_SIDE, so the casts are lossless
        let mut offsets = ArrayVec::new();
        for (dy, row) in self.cells.iter().enumerate() {
            for (dx, &occupied) in row.iter().enumerate() {
                if occupied {
                    offsets.push((dx as i32, dy as i32));
                }
            }
        }
        offsets
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// Column `c` of the input, read top to bottom and then reversed, becomes
    /// row `c` of the output, so an `H×W` shape yields a `W×H` one. `self` is
    /// left untouched.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let cells = (0..self.width())
            .map(|c| {
                let mut row = self.cells.iter().map(|r| r[c]).collect::<Vec<_>>();
                row.reverse();
                row
            })
            .collect();
        Self { cells }
    }
}
