use std::iter;

use serde::Serialize;

use crate::core::{BoardState, CellCoord, Mark};

/// Number of marks in a line that wins the game.
pub const WIN_RUN_LENGTH: usize = 3;

/// Line direction checked by the win detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    #[display("horizontal")]
    Horizontal,
    #[display("vertical")]
    Vertical,
    /// Top-left to bottom-right.
    #[display("diagonal-down")]
    DiagonalDown,
    /// Top-right to bottom-left.
    #[display("diagonal-up")]
    DiagonalUp,
}

impl Axis {
    /// Axes in the order they are checked.
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DiagonalDown,
        Self::DiagonalUp,
    ];

    /// One step in the positive direction as `(d_row, d_col)`.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::DiagonalDown => (1, 1),
            Self::DiagonalUp => (1, -1),
        }
    }
}

/// Run of same-mark cells that ended the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    pub mark: Mark,
    pub axis: Axis,
    /// Cells of the run, ordered from the negative end to the positive end.
    pub cells: Vec<CellCoord>,
}

impl WinningLine {
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Returns whether placing `mark` at `last` completed a line.
///
/// Pure query over the board; see [`winning_line`] for the rule.
#[must_use]
pub fn check_win(board: &BoardState, mark: Mark, last: CellCoord) -> bool {
    winning_line(board, mark, last).is_some()
}

/// Finds the line through `last` that wins for `mark`.
///
/// For each [`Axis`] in order, counts the consecutive `mark` cells walking
/// away from `last` in both directions. The walk stops at the first cell
/// holding the other mark or nothing, which includes every cell off the
/// board. The first axis where both counts add up to at least
/// `WIN_RUN_LENGTH - 1` wins; `last` itself completes the run.
#[must_use]
pub fn winning_line(board: &BoardState, mark: Mark, last: CellCoord) -> Option<WinningLine> {
    Axis::ALL.into_iter().find_map(|axis| {
        let (d_row, d_col) = axis.step();
        let forward = run_from(board, mark, last, d_row, d_col);
        let backward = run_from(board, mark, last, -d_row, -d_col);
        if forward.len() + backward.len() < WIN_RUN_LENGTH - 1 {
            return None;
        }

        let cells = backward
            .into_iter()
            .rev()
            .chain(iter::once(last))
            .chain(forward)
            .collect();
        Some(WinningLine { mark, axis, cells })
    })
}

fn run_from(
    board: &BoardState,
    mark: Mark,
    origin: CellCoord,
    d_row: i32,
    d_col: i32,
) -> Vec<CellCoord> {
    iter::successors(origin.offset(d_row, d_col), |coord| {
        coord.offset(d_row, d_col)
    })
    .take_while(|coord| board.get(*coord) == Some(mark))
    .collect()
}
