//! Board data structures: coordinates, marks and cell occupancy.

pub use self::{board_state::*, coord::*, mark::*};

pub(crate) mod board_state;
pub(crate) mod coord;
pub(crate) mod mark;
