use serde::{Deserialize, Serialize};

/// Player input understood by [`Game::apply`](crate::Game::apply).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Command {
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("soft drop")]
    SoftDrop,
    #[display("rotate")]
    Rotate,
}

impl Command {
    pub const ALL: [Self; 4] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::SoftDrop,
        Self::Rotate,
    ];
}

/// Result of [`Game::apply`](crate::Game::apply).
///
/// A blocked move is a normal outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The active piece moved or rotated.
    Applied,
    /// The result would collide with the board or its walls; nothing changed.
    Blocked,
    /// The game is over; commands have no effect.
    Ignored,
}
