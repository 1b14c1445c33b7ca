pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a move is refused. A refused move never changes the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum InvalidMove {
    #[display("cell already played!")]
    AlreadyPlayed { coord: CellCoord },
    #[display("cell {coord} is outside the board")]
    OutOfBounds { coord: CellCoord },
    #[display("previous move has not been evaluated yet")]
    EvaluationPending,
    #[display("game is already over")]
    SessionFinished,
}
