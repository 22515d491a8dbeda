use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

mod local;
mod pairwise;

/// Whether the one-shot pairwise subset pass runs after the local-rule
/// fixpoint stabilizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubsetPass {
    Apply,
    Skip,
}

impl Default for SubsetPass {
    fn default() -> Self {
        Self::Apply
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    pub conflict_policy: ConflictPolicy,
    pub subset_pass: SubsetPass,
}

/// A rule application that the monotone lattice refused. Only produced
/// under `ConflictPolicy::Monotone`; last-writer-wins swallows these
/// silently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contradiction {
    ConflictingAnnotation {
        coords: Coord2,
        existing: Annotation,
        attempted: Annotation,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    pub sweep_count: u32,
    pub local_change_count: u32,
    pub pairwise_change_count: u32,
    pub safe_count: u32,
    pub dangerous_count: u32,
    pub suspect_flag_count: u32,
    pub wrong_flag_count: u32,
    pub contradiction_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HintBuildOutput {
    pub hints: HintMap,
    pub contradictions: Vec<Contradiction>,
    pub stats: SweepStats,
}

/// Runs one full deduction cycle over an immutable board snapshot.
///
/// Order of passes: flag-count validation, then the local-rule fixpoint,
/// then (unless skipped) one pairwise subset pass. The pairwise results are
/// not fed back into another fixpoint round.
pub fn build_hint_map(board: &Board, config: AnalysisConfig) -> HintBuildOutput {
    let mut hints = HintMap::new(board.size());
    let mut contradictions = Vec::new();

    local::preflight_flag_pass(board, &mut hints, config.conflict_policy, &mut contradictions);

    let fixpoint = local::run_to_fixpoint(
        board,
        &mut hints,
        config.conflict_policy,
        &mut contradictions,
    );

    let pairwise_change_count = match config.subset_pass {
        SubsetPass::Apply => pairwise::subset_pass(
            board,
            &mut hints,
            config.conflict_policy,
            &mut contradictions,
        ),
        SubsetPass::Skip => 0,
    };

    let stats = SweepStats {
        sweep_count: fixpoint.sweep_count,
        local_change_count: fixpoint.change_count,
        pairwise_change_count,
        safe_count: hints.count_of(Annotation::Safe),
        dangerous_count: hints.count_of(Annotation::Dangerous),
        suspect_flag_count: hints.count_of(Annotation::SuspectFlag),
        wrong_flag_count: hints.count_of(Annotation::ConfirmedWrongFlag),
        contradiction_count: contradictions
            .len()
            .try_into()
            .expect("contradiction count should fit in u32"),
    };

    HintBuildOutput {
        hints,
        contradictions,
        stats,
    }
}

/// Applies a batch of pending annotations, returning how many landed.
/// Rejected writes are recorded once per distinct contradiction.
fn apply_changes(
    hints: &mut HintMap,
    pending: impl IntoIterator<Item = (Coord2, Annotation)>,
    policy: ConflictPolicy,
    contradictions: &mut Vec<Contradiction>,
) -> u32 {
    let mut applied = 0;

    for (coords, attempted) in pending {
        match hints.annotate(coords, attempted, policy) {
            AnnotateOutcome::Updated => applied += 1,
            AnnotateOutcome::Unchanged => {}
            AnnotateOutcome::Rejected { existing } => {
                let contradiction = Contradiction::ConflictingAnnotation {
                    coords,
                    existing,
                    attempted,
                };
                if !contradictions.contains(&contradiction) {
                    contradictions.push(contradiction);
                }
            }
        }
    }

    applied
}
