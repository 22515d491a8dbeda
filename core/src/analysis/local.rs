use alloc::vec::Vec;
use smallvec::SmallVec;

use super::{Contradiction, apply_changes};
use crate::*;

type Pending = SmallVec<[(Coord2, Annotation); 8]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) struct FixpointSummary {
    pub sweep_count: u32,
    pub change_count: u32,
}

/// Neighbor counts for one clue visit, taken from a snapshot of the hint
/// map before any of the visit's own writes land.
struct ClueCounts {
    flags: usize,
    unknowns: usize,
    dangerous_like: usize,
    safe: usize,
    unresolved_flags: usize,
}

fn count_neighbors(board: &Board, hints: &HintMap, neighbors: &[Coord2]) -> ClueCounts {
    let mut counts = ClueCounts {
        flags: 0,
        unknowns: 0,
        dangerous_like: 0,
        safe: 0,
        unresolved_flags: 0,
    };

    for &pos in neighbors {
        match board[pos] {
            TileState::Flagged => {
                counts.flags += 1;
                if hints.annotation_at(pos) == Annotation::Unresolved {
                    counts.unresolved_flags += 1;
                }
            }
            TileState::Covered => counts.unknowns += 1,
            // Revealed and unreadable neighbors constrain nothing.
            TileState::Revealed(_) | TileState::Unreadable => {}
        }

        match hints.annotation_at(pos) {
            Annotation::Dangerous | Annotation::ConfirmedWrongFlag => counts.dangerous_like += 1,
            Annotation::Safe => counts.safe += 1,
            _ => {}
        }
    }

    counts
}

/// Applies rule A alone for every clue, once, before the first sweep.
pub(super) fn preflight_flag_pass(
    board: &Board,
    hints: &mut HintMap,
    policy: ConflictPolicy,
    contradictions: &mut Vec<Contradiction>,
) -> u32 {
    let mut applied = 0;

    for (coords, clue) in board.iter_clues() {
        let neighbors: SmallVec<[Coord2; 8]> = board.iter_neighbors(coords).collect();
        let flags = neighbors
            .iter()
            .filter(|&&pos| board[pos].is_flagged())
            .count();

        if flags > usize::from(clue) {
            let mut pending = Pending::new();
            push_suspect_flags(board, hints, &neighbors, &mut pending);
            applied += apply_changes(hints, pending, policy, contradictions);
        }
    }

    applied
}

/// Sweeps every clue tile until a full sweep yields no change.
pub(super) fn run_to_fixpoint(
    board: &Board,
    hints: &mut HintMap,
    policy: ConflictPolicy,
    contradictions: &mut Vec<Contradiction>,
) -> FixpointSummary {
    let mut sweep_count = 0;
    let mut change_count = 0;

    loop {
        sweep_count += 1;
        let mut sweep_changes = 0;

        for (coords, clue) in board.iter_clues() {
            sweep_changes += visit_clue(board, coords, clue, hints, policy, contradictions);
        }

        change_count += sweep_changes;
        log::debug!("sweep {sweep_count}: {sweep_changes} changes");

        if sweep_changes == 0 {
            break;
        }
    }

    FixpointSummary {
        sweep_count,
        change_count,
    }
}

/// One visit of rules A-D for a single numbered tile. All counts come from
/// the pre-visit hint snapshot; the visit's writes are applied together at
/// the end.
fn visit_clue(
    board: &Board,
    coords: Coord2,
    clue: u8,
    hints: &mut HintMap,
    policy: ConflictPolicy,
    contradictions: &mut Vec<Contradiction>,
) -> u32 {
    let clue = usize::from(clue);
    let neighbors: SmallVec<[Coord2; 8]> = board.iter_neighbors(coords).collect();
    let counts = count_neighbors(board, hints, &neighbors);
    let mut pending = Pending::new();

    // Rule A: more flags around the tile than its number permits. At least
    // one flag is wrong, but which one cannot be pinpointed.
    let confirmed_flags = if counts.flags > clue {
        push_suspect_flags(board, hints, &neighbors, &mut pending);
        0
    } else {
        counts.unresolved_flags
    };

    // Rule B: the mine quota is already met by flags alone.
    if confirmed_flags == clue {
        for &pos in &neighbors {
            if board[pos].is_covered() && hints.annotation_at(pos) != Annotation::Safe {
                pending.push((pos, Annotation::Safe));
            }
        }
    }

    // Rule C: the quota is met once deduced mines are counted in.
    if confirmed_flags + counts.dangerous_like == clue {
        for &pos in &neighbors {
            if board[pos].is_covered() && hints.annotation_at(pos) == Annotation::Unresolved {
                pending.push((pos, Annotation::Safe));
            }
        }
    }

    // Rule D: every remaining unknown neighbor must be a mine. The quota is
    // now explained without any suspect flag, so suspects are confirmed
    // wrong.
    if counts.unknowns + counts.flags == clue + counts.safe {
        for &pos in &neighbors {
            match (board[pos], hints.annotation_at(pos)) {
                (TileState::Covered, Annotation::Unresolved) => {
                    pending.push((pos, Annotation::Dangerous));
                }
                (TileState::Flagged, Annotation::SuspectFlag) => {
                    pending.push((pos, Annotation::ConfirmedWrongFlag));
                }
                _ => {}
            }
        }
    }

    apply_changes(hints, pending, policy, contradictions)
}

fn push_suspect_flags(
    board: &Board,
    hints: &HintMap,
    neighbors: &[Coord2],
    pending: &mut Pending,
) {
    for &pos in neighbors {
        if board[pos].is_flagged() && hints.annotation_at(pos) == Annotation::Unresolved {
            pending.push((pos, Annotation::SuspectFlag));
        }
    }
}
