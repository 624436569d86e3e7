use serde::{Deserialize, Serialize, Serializer};

/// Color identifier of a block.
///
/// The engine never interprets colors; renderers map them to whatever their
/// surface supports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    #[display("red")]
    Red,
    #[display("green")]
    Green,
    #[display("blue")]
    Blue,
    #[display("cyan")]
    Cyan,
    #[display("magenta")]
    Magenta,
    #[display("yellow")]
    Yellow,
    #[display("orange")]
    Orange,
}

impl BlockColor {
    pub const LEN: usize = 7;

    /// Every color, in the order of the default palette.
    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Cyan,
        Self::Magenta,
        Self::Yellow,
        Self::Orange,
    ];
}

/// A single board cell: empty or holding the color of a locked block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<BlockColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Serialized as `null` for an empty cell and as the color name otherwise.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.color().serialize(serializer)
    }
}
