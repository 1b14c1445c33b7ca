use serde::{Deserialize, Serialize};

/// Mark placed by a player.
///
/// `Cross` always moves first. The display form is the lowercase player name
/// used in messages (`"cross has won the game!"`); glyphs are chosen by the
/// front end.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[display("cross")]
    Cross,
    #[display("circle")]
    Circle,
}

impl Mark {
    pub const LEN: usize = 2;
    pub const ALL: [Self; Self::LEN] = [Self::Cross, Self::Circle];

    /// Returns the mark whose turn it is for the given turn counter.
    #[must_use]
    pub const fn for_turn(turn: u64) -> Self {
        if turn % 2 == 0 {
            Self::Cross
        } else {
            Self::Circle
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Cross => Self::Circle,
            Self::Circle => Self::Cross,
        }
    }

    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
