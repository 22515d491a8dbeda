use alloc::vec::Vec;
use smallvec::SmallVec;

use super::{Contradiction, apply_changes};
use crate::*;

type Neighborhood = SmallVec<[Coord2; 8]>;

/// One-shot subset-difference pass over horizontally and vertically
/// adjacent clue pairs, run after the local fixpoint stabilizes. Right and
/// down directions only, so each unordered pair is examined once. The
/// whole pass collects its changes against the stabilized map and applies
/// them at the end; it is not iterated.
pub(super) fn subset_pass(
    board: &Board,
    hints: &mut HintMap,
    policy: ConflictPolicy,
    contradictions: &mut Vec<Contradiction>,
) -> u32 {
    let (rows, cols) = board.size();
    let mut pending: Vec<(Coord2, Annotation)> = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let first = (row, col);
            let Some(clue1) = board.clue_at(first) else {
                continue;
            };

            for second in [(row, col + 1), (row + 1, col)] {
                if second.0 >= rows || second.1 >= cols {
                    continue;
                }
                let Some(clue2) = board.clue_at(second) else {
                    continue;
                };

                analyze_pair(board, hints, first, clue1, second, clue2, &mut pending);
            }
        }
    }

    let applied = apply_changes(hints, pending, policy, contradictions);
    log::trace!("subset pass applied {applied} changes");
    applied
}

fn analyze_pair(
    board: &Board,
    hints: &HintMap,
    first: Coord2,
    clue1: u8,
    second: Coord2,
    clue2: u8,
    pending: &mut Vec<(Coord2, Annotation)>,
) {
    let neighbors1: Neighborhood = board.iter_neighbors(first).collect();
    let neighbors2: Neighborhood = board.iter_neighbors(second).collect();

    let flags1 = count_flags(board, &neighbors1);
    let flags2 = count_flags(board, &neighbors2);
    let remaining1 = i16::from(clue1) - flags1;
    let remaining2 = i16::from(clue2) - flags2;

    let exclusive1 = covered_cells(board, &neighbors1, |pos| !neighbors2.contains(&pos));
    let exclusive2 = covered_cells(board, &neighbors2, |pos| !neighbors1.contains(&pos));
    let shared_unknown = covered_cells(board, &neighbors1, |pos| neighbors2.contains(&pos));

    // The tile with the larger remainder owes all of it to its exclusive
    // unknowns: every one of them is a mine.
    if remaining2 > remaining1 && remaining2 - remaining1 == exclusive2.len() as i16 {
        push_unresolved(hints, &exclusive2, Annotation::Dangerous, pending);
    }
    if remaining1 > remaining2 && remaining1 - remaining2 == exclusive1.len() as i16 {
        push_unresolved(hints, &exclusive1, Annotation::Dangerous, pending);
    }

    // Equal remainders with no exclusive unknowns on either side: the
    // shared unknowns carry no extra mines.
    if remaining1 == remaining2
        && !shared_unknown.is_empty()
        && exclusive1.is_empty()
        && exclusive2.is_empty()
    {
        push_unresolved(hints, &shared_unknown, Annotation::Safe, pending);
    }
}

fn count_flags(board: &Board, neighbors: &[Coord2]) -> i16 {
    neighbors
        .iter()
        .filter(|&&pos| board[pos].is_flagged())
        .count() as i16
}

fn covered_cells(
    board: &Board,
    neighbors: &[Coord2],
    select: impl Fn(Coord2) -> bool,
) -> Neighborhood {
    neighbors
        .iter()
        .copied()
        .filter(|&pos| board[pos].is_covered() && select(pos))
        .collect()
}

fn push_unresolved(
    hints: &HintMap,
    cells: &[Coord2],
    annotation: Annotation,
    pending: &mut Vec<(Coord2, Annotation)>,
) {
    for &pos in cells {
        if hints.annotation_at(pos) == Annotation::Unresolved {
            pending.push((pos, annotation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Annotation::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn run(board: &Board) -> (HintMap, u32) {
        let mut hints = HintMap::new(board.size());
        let mut contradictions = Vec::new();
        let applied = subset_pass(
            board,
            &mut hints,
            ConflictPolicy::Monotone,
            &mut contradictions,
        );
        assert!(contradictions.is_empty(), "unexpected {contradictions:?}");
        (hints, applied)
    }

    #[test]
    fn one_two_pattern_marks_exclusive_unknowns_dangerous() {
        // The 2 owes one more mine than the 1, and has exactly one
        // exclusive unknown: that cell is a mine. Nothing else is touched.
        let board = board(&["???", "120"]);

        let (hints, applied) = run(&board);

        assert_eq!(hints.annotation_at((0, 2)), Dangerous);
        assert_eq!(applied, 1);
        assert_eq!(hints.annotation_at((0, 0)), Unresolved);
        assert_eq!(hints.annotation_at((0, 1)), Unresolved);
    }

    #[test]
    fn vertical_pair_is_analyzed_too() {
        let board = board(&["1?", "2?", "0?"]);

        let (hints, _) = run(&board);

        // The 2 at (1, 0) has one exclusive unknown, (2, 1).
        assert_eq!(hints.annotation_at((2, 1)), Dangerous);
        assert_eq!(hints.annotation_at((0, 1)), Unresolved);
        assert_eq!(hints.annotation_at((1, 1)), Unresolved);
    }

    #[test]
    fn larger_remainder_on_the_left_marks_its_exclusive_cells() {
        let board = board(&["???", "021"]);

        let (hints, _) = run(&board);

        assert_eq!(hints.annotation_at((0, 0)), Dangerous);
        assert_eq!(hints.annotation_at((0, 1)), Unresolved);
        assert_eq!(hints.annotation_at((0, 2)), Unresolved);
    }

    #[test]
    fn flags_reduce_the_remaining_mine_count() {
        // The flag satisfies the 2 down to a remainder of 1, equal to the
        // 1's remainder, so no difference deduction fires; the exclusive
        // unknown at (1, 2) keeps the shared-safe rule out too.
        let board = board(&["??F", "12?"]);

        let (hints, applied) = run(&board);

        assert_eq!(applied, 0);
        assert_eq!(hints.annotation_at((0, 0)), Unresolved);
        assert_eq!(hints.annotation_at((0, 1)), Unresolved);
        assert_eq!(hints.annotation_at((1, 2)), Unresolved);
    }

    #[test]
    fn equal_remainders_with_only_shared_unknowns_mark_them_safe() {
        let board = board(&["11", "??"]);

        let (hints, _) = run(&board);

        assert_eq!(hints.annotation_at((1, 0)), Safe);
        assert_eq!(hints.annotation_at((1, 1)), Safe);
    }

    #[test]
    fn pass_only_overwrites_unresolved_cells() {
        let board = board(&["???", "120"]);

        let mut hints = HintMap::new(board.size());
        hints.annotate((0, 2), Safe, ConflictPolicy::Monotone);
        let mut contradictions = Vec::new();

        let applied = subset_pass(
            &board,
            &mut hints,
            ConflictPolicy::Monotone,
            &mut contradictions,
        );

        assert_eq!(applied, 0);
        assert!(contradictions.is_empty());
        assert_eq!(hints.annotation_at((0, 2)), Safe);
    }

    #[test]
    fn diagonal_clue_pairs_are_ignored() {
        let board = board(&["1?", "?2"]);

        let (_, applied) = run(&board);

        assert_eq!(applied, 0);
    }
}
