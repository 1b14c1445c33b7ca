//! Game rules on top of the board state.
//!
//! - [`win_detector`] - Line detection around the last placed cell
//! - [`GameSession`] - Turn order and the record/evaluate cycle of each move
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]
//! 2. [`GameSession::play`] records the current player's mark, evicting
//!    their oldest mark when they already have three on the board
//! 3. The front end draws the board
//! 4. [`GameSession::evaluate`] checks for a line through the new mark
//! 5. Repeat until a player wins

pub use self::{game_session::*, win_detector::*};

mod game_session;
pub mod win_detector;
