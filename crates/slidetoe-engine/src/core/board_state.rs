use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::InvalidMove;

use super::{coord::CellCoord, mark::Mark};

/// Maximum number of marks a player can have on the board at once.
pub const LIVE_MARK_LIMIT: usize = 3;

/// Cells currently occupied by one player, oldest first.
pub type LiveMarkQueue = ArrayVec<CellCoord, LIVE_MARK_LIMIT>;

/// Occupancy of the board.
///
/// Stores only occupied cells; a cell without an entry is empty. Alongside
/// the cell map, each mark keeps a [`LiveMarkQueue`] of its cells in
/// placement order. Both views are updated together by [`Self::apply_move`],
/// so for every mark the queue holds exactly the cells mapped to that mark.
///
/// # Sliding window
///
/// A player never has more than [`LIVE_MARK_LIMIT`] marks on the board.
/// Placing one more evicts that player's oldest mark first.
///
/// # Example
///
/// ```
/// use slidetoe_engine::{BoardState, CellCoord, Mark};
///
/// let mut board = BoardState::new();
/// for (row, col) in [(0, 0), (1, 1), (2, 2)] {
///     board.apply_move(CellCoord::new(row, col), Mark::Cross).unwrap();
/// }
///
/// // The fourth mark pushes out the first one.
/// let evicted = board.apply_move(CellCoord::new(0, 2), Mark::Cross).unwrap();
/// assert_eq!(evicted, Some(CellCoord::new(0, 0)));
/// assert_eq!(board.get(CellCoord::new(0, 0)), None);
/// assert_eq!(board.live_marks(Mark::Cross).len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    cells: BTreeMap<CellCoord, Mark>,
    live_marks: [LiveMarkQueue; Mark::LEN],
}

impl BoardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark at `coord`, or `None` if the cell is empty or off the board.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<Mark> {
        self.cells.get(&coord).copied()
    }

    #[must_use]
    pub fn is_empty_at(&self, coord: CellCoord) -> bool {
        !self.cells.contains_key(&coord)
    }

    /// Returns the cells occupied by `mark`, oldest first.
    #[must_use]
    pub fn live_marks(&self, mark: Mark) -> &[CellCoord] {
        &self.live_marks[mark.index()]
    }

    /// Returns the cell that `mark` would lose on its next placement, if any.
    #[must_use]
    pub fn next_eviction(&self, mark: Mark) -> Option<CellCoord> {
        let queue = &self.live_marks[mark.index()];
        if queue.is_full() {
            queue.first().copied()
        } else {
            None
        }
    }

    /// Iterates over the occupied cells in coordinate order.
    pub fn entries(&self) -> impl Iterator<Item = (CellCoord, Mark)> + '_ {
        self.cells.iter().map(|(coord, mark)| (*coord, *mark))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Places `mark` at `coord`, evicting the player's oldest mark if it
    /// already has [`LIVE_MARK_LIMIT`] marks on the board.
    ///
    /// Returns the evicted cell, if any. On error the board is unchanged.
    pub fn apply_move(
        &mut self,
        coord: CellCoord,
        mark: Mark,
    ) -> Result<Option<CellCoord>, InvalidMove> {
        if !coord.is_on_board() {
            return Err(InvalidMove::OutOfBounds { coord });
        }
        if !self.is_empty_at(coord) {
            return Err(InvalidMove::AlreadyPlayed { coord });
        }

        let queue = &mut self.live_marks[mark.index()];
        let evicted = if queue.is_full() {
            let oldest = queue.remove(0);
            let removed = self.cells.remove(&oldest);
            debug_assert_eq!(removed, Some(mark));
            Some(oldest)
        } else {
            None
        };

        self.cells.insert(coord, mark);
        queue.push(coord);
        Ok(evicted)
    }

    /// Builds a board holding exactly `cells`, ignoring the grid bounds and
    /// the live mark limit. The queues are left empty.
    #[cfg(test)]
    pub(crate) fn from_cells_unchecked(cells: &BTreeMap<CellCoord, Mark>) -> Self {
        Self {
            cells: cells.clone(),
            live_marks: Default::default(),
        }
    }
}
