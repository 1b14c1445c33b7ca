use std::{collections::BTreeMap, path::PathBuf};

use serde::Serialize;
use slidetoe_engine::{CellCoord, GameSession, Mark, MoveOutcome, WinningLine};

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Cells to play in order, Cross first (e.g. `1.1 0.0 2.2`)
    #[clap(required = true)]
    coords: Vec<CellCoord>,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    moves: Vec<MoveReport>,
    /// Cells not played because the game was already won.
    skipped: Vec<CellCoord>,
    board: BTreeMap<CellCoord, Mark>,
    queues: LiveMarkQueues,
    turn: u64,
    winner: Option<WinningLine>,
}

#[derive(Debug, Serialize)]
struct MoveReport {
    coord: CellCoord,
    mark: Mark,
    #[serde(flatten)]
    result: MoveResult,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
enum MoveResult {
    Continue {
        evicted: Option<CellCoord>,
        turn: u64,
    },
    Won {
        evicted: Option<CellCoord>,
        turn: u64,
    },
    Rejected {
        reason: String,
    },
}

#[derive(Debug, Serialize)]
struct LiveMarkQueues {
    cross: Vec<CellCoord>,
    circle: Vec<CellCoord>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg { coords, output } = arg;

    let output = Output::from_path(output.clone());
    eprintln!("Simulating {} moves...", coords.len());
    let report = simulate(coords);
    output.write_json(&report)?;
    eprintln!("Report written to {}", output.display_path());

    Ok(())
}

fn simulate(coords: &[CellCoord]) -> SimulationReport {
    let mut session = GameSession::new();
    let mut moves = vec![];
    let mut remaining = coords.iter();

    for &coord in remaining.by_ref() {
        let mark = session.current_mark();
        let result = match session.play(coord) {
            Ok(placed) => match session.evaluate() {
                Some(MoveOutcome::Won(_)) => MoveResult::Won {
                    evicted: placed.evicted,
                    turn: placed.turn,
                },
                Some(MoveOutcome::Continue { .. }) | None => MoveResult::Continue {
                    evicted: placed.evicted,
                    turn: placed.turn,
                },
            },
            Err(err) => {
                tracing::warn!(%coord, %mark, %err, "move rejected");
                MoveResult::Rejected {
                    reason: err.to_string(),
                }
            }
        };
        let won = matches!(result, MoveResult::Won { .. });
        moves.push(MoveReport { coord, mark, result });
        if won {
            break;
        }
    }

    let skipped: Vec<_> = remaining.copied().collect();
    if !skipped.is_empty() {
        tracing::info!(count = skipped.len(), "moves after the win were skipped");
    }

    let board = session.board();
    SimulationReport {
        moves,
        skipped,
        board: board.entries().collect(),
        queues: LiveMarkQueues {
            cross: board.live_marks(Mark::Cross).to_vec(),
            circle: board.live_marks(Mark::Circle).to_vec(),
        },
        turn: session.turn(),
        winner: session.winning_line().cloned(),
    }
}
