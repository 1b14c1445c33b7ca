use serde::Serialize;

use crate::{
    InvalidMove,
    core::{BoardState, CellCoord, Mark},
};

use super::win_detector::{self, WinningLine};

/// A move that has been recorded on the board but not yet checked for a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedMove {
    pub coord: CellCoord,
    pub mark: Mark,
    /// Cell freed by the sliding window to make room for this move.
    pub evicted: Option<CellCoord>,
    pub turn: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the player to move.
    AwaitingMove,
    /// A move was recorded and must be evaluated before the next one.
    AwaitingEvaluation(PlacedMove),
    /// The game was won; the session accepts no more moves.
    Finished(WinningLine),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    Won(WinningLine),
    Continue { next: Mark },
}

/// One game, from the empty board to a win.
///
/// Each move happens in two steps so that the front end can show the board
/// between them:
///
/// 1. [`play`](Self::play) validates the cell, applies the sliding window and
///    records the mark.
/// 2. [`evaluate`](Self::evaluate) runs the win detector on the recorded move
///    and either ends the game or passes the turn.
///
/// Moves are refused while a recorded move is awaiting evaluation and after
/// the game is won.
///
/// # Example
///
/// ```
/// use slidetoe_engine::{CellCoord, GameSession, Mark, MoveOutcome};
///
/// let mut session = GameSession::new();
/// let placed = session.play(CellCoord::new(1, 1)).unwrap();
/// assert_eq!(placed.mark, Mark::Cross);
///
/// // The board already shows the mark, but the turn passes only after evaluation.
/// assert_eq!(session.board().get(CellCoord::new(1, 1)), Some(Mark::Cross));
/// assert_eq!(session.current_mark(), Mark::Cross);
///
/// let outcome = session.evaluate();
/// assert_eq!(outcome, Some(MoveOutcome::Continue { next: Mark::Circle }));
/// assert_eq!(session.current_mark(), Mark::Circle);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: BoardState,
    turn: u64,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: BoardState::new(),
            turn: 0,
            state: SessionState::AwaitingMove,
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Number of completed, non-winning moves.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mark of the player to move (or, while a move awaits evaluation, the
    /// player who just moved).
    #[must_use]
    pub fn current_mark(&self) -> Mark {
        Mark::for_turn(self.turn)
    }

    #[must_use]
    pub fn winning_line(&self) -> Option<&WinningLine> {
        match &self.state {
            SessionState::Finished(line) => Some(line),
            _ => None,
        }
    }

    /// Records a move for the current player.
    ///
    /// If the player already has three marks on the board, the oldest one is
    /// removed first. The session then waits for [`Self::evaluate`].
    pub fn play(&mut self, coord: CellCoord) -> Result<PlacedMove, InvalidMove> {
        match self.state {
            SessionState::AwaitingMove => {}
            SessionState::AwaitingEvaluation(_) => return Err(InvalidMove::EvaluationPending),
            SessionState::Finished(_) => return Err(InvalidMove::SessionFinished),
        }

        let mark = self.current_mark();
        let evicted = self.board.apply_move(coord, mark)?;
        let placed = PlacedMove {
            coord,
            mark,
            evicted,
            turn: self.turn,
        };
        tracing::debug!(%coord, %mark, ?evicted, turn = self.turn, "move recorded");
        tracing::trace!(board = ?self.board.entries().collect::<Vec<_>>());

        self.state = SessionState::AwaitingEvaluation(placed);
        Ok(placed)
    }

    /// Checks the recorded move for a win.
    ///
    /// Returns `None` if no move is awaiting evaluation.
    pub fn evaluate(&mut self) -> Option<MoveOutcome> {
        let SessionState::AwaitingEvaluation(placed) = self.state else {
            return None;
        };

        if let Some(line) = win_detector::winning_line(&self.board, placed.mark, placed.coord) {
            tracing::info!(mark = %line.mark, axis = %line.axis, turn = self.turn, "game won");
            self.state = SessionState::Finished(line.clone());
            return Some(MoveOutcome::Won(line));
        }

        self.turn += 1;
        self.state = SessionState::AwaitingMove;
        Some(MoveOutcome::Continue {
            next: self.current_mark(),
        })
    }

    /// Records and immediately evaluates a move.
    ///
    /// For callers with nothing to show between the two steps.
    pub fn play_and_evaluate(&mut self, coord: CellCoord) -> Result<MoveOutcome, InvalidMove> {
        self.play(coord)?;
        Ok(self
            .evaluate()
            .expect("a recorded move is always awaiting evaluation"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use crate::LIVE_MARK_LIMIT;

    use super::*;

    fn c(row: i32, col: i32) -> CellCoord {
        CellCoord::new(row, col)
    }

    fn play_all(session: &mut GameSession, coords: &[CellCoord]) -> MoveOutcome {
        let mut outcome = None;
        for coord in coords {
            outcome = Some(session.play_and_evaluate(*coord).unwrap());
        }
        outcome.unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::new();
        assert_eq!(session.current_mark(), Mark::Cross);

        let outcome = play_all(&mut session, &[c(0, 0), c(1, 1)]);
        assert_eq!(outcome, MoveOutcome::Continue { next: Mark::Cross });
        assert_eq!(session.turn(), 2);
        assert_eq!(session.board().get(c(0, 0)), Some(Mark::Cross));
        assert_eq!(session.board().get(c(1, 1)), Some(Mark::Circle));
    }

    #[test]
    fn test_play_is_refused_until_evaluated() {
        let mut session = GameSession::new();
        session.play(c(0, 0)).unwrap();

        assert_eq!(session.play(c(1, 1)), Err(InvalidMove::EvaluationPending));
        assert!(session.board().is_empty_at(c(1, 1)));

        session.evaluate();
        assert_eq!(session.evaluate(), None);
        assert!(session.play(c(1, 1)).is_ok());
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut session = GameSession::new();
        play_all(&mut session, &[c(1, 1)]);
        let board = session.board().clone();

        assert_eq!(
            session.play(c(1, 1)),
            Err(InvalidMove::AlreadyPlayed { coord: c(1, 1) })
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.current_mark(), Mark::Circle);
        assert!(session.state().is_awaiting_move());
    }

    #[test]
    fn test_diagonal_win_finishes_session() {
        let mut session = GameSession::new();
        let outcome = play_all(
            &mut session,
            &[c(0, 0), c(0, 1), c(1, 1), c(0, 2), c(2, 2)],
        );

        let MoveOutcome::Won(line) = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(line.mark, Mark::Cross);
        assert_eq!(line.cells, vec![c(0, 0), c(1, 1), c(2, 2)]);

        // The winning move does not advance the turn counter.
        assert_eq!(session.turn(), 4);
        assert_eq!(session.winning_line(), Some(&line));
        assert_eq!(session.play(c(2, 0)), Err(InvalidMove::SessionFinished));
    }

    #[test]
    fn test_fourth_mark_evicts_before_placing() {
        let mut session = GameSession::new();
        // Cross: 0.0, 2.1, 1.0  Circle: 1.1, 2.2, 1.2
        play_all(
            &mut session,
            &[c(0, 0), c(1, 1), c(2, 1), c(2, 2), c(1, 0), c(1, 2)],
        );

        let placed = session.play(c(0, 2)).unwrap();
        assert_eq!(placed.evicted, Some(c(0, 0)));
        assert!(session.board().is_empty_at(c(0, 0)));
        assert_eq!(
            session.board().live_marks(Mark::Cross),
            &[c(2, 1), c(1, 0), c(0, 2)]
        );
    }

    #[test]
    fn test_line_through_evicted_mark_does_not_win() {
        let mut session = GameSession::new();
        // Cross builds 0.0 and 0.1 early, then a third mark elsewhere.
        play_all(
            &mut session,
            &[c(0, 0), c(1, 0), c(0, 1), c(1, 1), c(2, 2), c(2, 0)],
        );
        // Circle's 1.0 1.1 2.0 has no line; Cross now plays 0.2, which would
        // complete the top row but evicts 0.0 first.
        let placed = session.play(c(0, 2)).unwrap();
        assert_eq!(placed.evicted, Some(c(0, 0)));
        assert_eq!(
            session.evaluate(),
            Some(MoveOutcome::Continue { next: Mark::Circle })
        );
    }

    #[test]
    fn test_evicting_move_can_still_win() {
        let mut session = GameSession::new();
        let outcome = play_all(
            &mut session,
            &[
                c(0, 0), // X
                c(0, 1), // O
                c(2, 0), // X
                c(1, 1), // O
                c(2, 1), // X
                c(1, 2), // O
                c(2, 2), // X evicts 0.0 and completes the bottom row
            ],
        );
        let MoveOutcome::Won(line) = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(line.cells, vec![c(2, 0), c(2, 1), c(2, 2)]);
    }

    #[test]
    fn test_random_games_keep_invariants() {
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut session = GameSession::new();
            for _ in 0..300 {
                let coord = c(rng.random_range(0..3), rng.random_range(0..3));
                let mark = session.current_mark();
                let before = session.board().clone();
                match session.play_and_evaluate(coord) {
                    Ok(MoveOutcome::Won(line)) => {
                        assert_eq!(line.mark, mark);
                        assert!(line.contains(coord));
                        assert!(session.state().is_finished());
                        break;
                    }
                    Ok(MoveOutcome::Continue { next }) => assert_eq!(next, mark.opponent()),
                    Err(err) => {
                        assert!(err.is_already_played());
                        assert_eq!(session.board(), &before);
                    }
                }

                for mark in Mark::ALL {
                    let queue = session.board().live_marks(mark);
                    assert!(queue.len() <= LIVE_MARK_LIMIT);
                    let queued: BTreeSet<_> = queue.iter().copied().collect();
                    let mapped: BTreeSet<_> = session
                        .board()
                        .entries()
                        .filter(|(_, m)| *m == mark)
                        .map(|(coord, _)| coord)
                        .collect();
                    assert_eq!(queued, mapped);
                }
            }
        }
    }
}
