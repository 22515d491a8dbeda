use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{Coord2, ToIndex};

/// Per-cell verdict of one deduction cycle.
///
/// The lattice per cell is `Unresolved -> {Safe | Dangerous | SuspectFlag}`
/// with `SuspectFlag -> ConfirmedWrongFlag` as the only further promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    Unresolved,
    Safe,
    Dangerous,
    SuspectFlag,
    ConfirmedWrongFlag,
}

impl Annotation {
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Unresolved => '.',
            Self::Safe => 'o',
            Self::Dangerous => 'X',
            Self::SuspectFlag => 'w',
            Self::ConfirmedWrongFlag => 'W',
        }
    }

    fn transition(self, next: Annotation) -> Transition {
        use Annotation::*;

        if self == next {
            return Transition::Redundant;
        }

        match (self, next) {
            (Unresolved, _) => Transition::Advance,
            (SuspectFlag, ConfirmedWrongFlag) => Transition::Advance,
            _ => Transition::Conflict,
        }
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::Unresolved
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transition {
    Redundant,
    Advance,
    Conflict,
}

/// How the engine treats a rule that would reverse an existing label.
///
/// The legacy implementation let the last writer win because its "already
/// labeled" guards only checked for the target label, never the opposite
/// one. `Monotone` keeps the first label and reports the attempt instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictPolicy {
    Monotone,
    LastWriterWins,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self::Monotone
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnnotateOutcome {
    Unchanged,
    Updated,
    Rejected { existing: Annotation },
}

impl AnnotateOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// The annotation grid produced by one deduction cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintMap {
    cells: Array2<Annotation>,
}

impl HintMap {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::from_elem(size.to_index(), Annotation::Unresolved),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (
            dim.0.try_into().expect("hint rows should fit in Coord"),
            dim.1.try_into().expect("hint cols should fit in Coord"),
        )
    }

    pub fn annotation_at(&self, coords: Coord2) -> Annotation {
        self.cells[coords.to_index()]
    }

    /// Writes `next` at `coords` under the monotone-update discipline.
    pub fn annotate(
        &mut self,
        coords: Coord2,
        next: Annotation,
        policy: ConflictPolicy,
    ) -> AnnotateOutcome {
        let current = self.cells[coords.to_index()];

        match current.transition(next) {
            Transition::Redundant => AnnotateOutcome::Unchanged,
            Transition::Advance => {
                self.cells[coords.to_index()] = next;
                AnnotateOutcome::Updated
            }
            Transition::Conflict => match policy {
                ConflictPolicy::Monotone => AnnotateOutcome::Rejected { existing: current },
                ConflictPolicy::LastWriterWins => {
                    self.cells[coords.to_index()] = next;
                    AnnotateOutcome::Updated
                }
            },
        }
    }

    pub fn count_of(&self, annotation: Annotation) -> u32 {
        self.cells
            .iter()
            .filter(|&&cell| cell == annotation)
            .count()
            .try_into()
            .expect("cell count should fit in u32")
    }

    pub fn unresolved_count(&self) -> u32 {
        self.count_of(Annotation::Unresolved)
    }

    /// Iterates all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Annotation)> + '_ {
        self.cells.indexed_iter().map(|((row, col), &annotation)| {
            ((row as crate::Coord, col as crate::Coord), annotation)
        })
    }
}
