use minehint_core::{Annotation, Board, Coord2, HintMap};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickButton {
    Left,
    Right,
}

impl ClickButton {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickReason {
    Safe,
    Mine,
    WrongFlag,
    Speculative,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickAction {
    pub button: ClickButton,
    pub reason: ClickReason,
    pub coords: Coord2,
    pub pixel: (u32, u32),
}

/// Pixel geometry of the detected playing field: the left edge of every
/// tile column and the top edge of every tile row, including the far
/// edges, exactly as the grid extractor reports them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    x_coords: Vec<u32>,
    y_coords: Vec<u32>,
}

impl GridGeometry {
    /// Uniform geometry from a field origin and tile size, for boards not
    /// captured from screen.
    pub fn from_origin(origin: (u32, u32), tile_size: u32, size: Coord2) -> Self {
        let x_coords = (0..=u32::from(size.1))
            .map(|col| origin.0 + col * tile_size)
            .collect();
        let y_coords = (0..=u32::from(size.0))
            .map(|row| origin.1 + row * tile_size)
            .collect();
        Self { x_coords, y_coords }
    }

    pub fn tile_size(&self) -> u32 {
        match self.x_coords.as_slice() {
            [first, second, ..] => second - first,
            _ => 0,
        }
    }

    /// Mouse target for a tile, compensating for display scaling.
    pub fn tile_center(&self, coords: Coord2, scaling: f32) -> (u32, u32) {
        let half = self.tile_size() / 2;
        let x = self.x_coords[usize::from(coords.1)] + half;
        let y = self.y_coords[usize::from(coords.0)] + half;
        (
            (x as f32 / scaling).round() as u32,
            (y as f32 / scaling).round() as u32,
        )
    }
}

/// Turns a hint map into mouse actions: left-click safe tiles, right-click
/// (flag) deduced mines, right-click confirmed wrong flags to lift them.
/// Suspect flags are left alone. When nothing was deduced and `speculate`
/// is set, one covered tile gets a speculative left click; whether to
/// speculate at all is the caller's policy, not the engine's.
pub fn build_click_plan(
    board: &Board,
    hints: &HintMap,
    geometry: &GridGeometry,
    scaling: f32,
    speculate: bool,
) -> Vec<ClickAction> {
    let mut actions = Vec::new();

    for (coords, annotation) in hints.iter() {
        let (button, reason) = match annotation {
            Annotation::Safe => (ClickButton::Left, ClickReason::Safe),
            Annotation::Dangerous => (ClickButton::Right, ClickReason::Mine),
            Annotation::ConfirmedWrongFlag => (ClickButton::Right, ClickReason::WrongFlag),
            Annotation::SuspectFlag | Annotation::Unresolved => continue,
        };
        actions.push(ClickAction {
            button,
            reason,
            coords,
            pixel: geometry.tile_center(coords, scaling),
        });
    }

    if actions.is_empty() && speculate {
        let fallback = hints.iter().find(|&(coords, annotation)| {
            annotation == Annotation::Unresolved && board.tile_at(coords).is_covered()
        });
        if let Some((coords, _)) = fallback {
            actions.push(ClickAction {
                button: ClickButton::Left,
                reason: ClickReason::Speculative,
                coords,
                pixel: geometry.tile_center(coords, scaling),
            });
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use minehint_core::{AnalysisConfig, ConflictPolicy, build_hint_map};

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn geometry_centers_account_for_scaling() {
        let geometry = GridGeometry::from_origin((100, 40), 30, (2, 3));

        assert_eq!(geometry.tile_size(), 30);
        assert_eq!(geometry.tile_center((0, 0), 1.0), (115, 55));
        assert_eq!(geometry.tile_center((1, 2), 1.0), (175, 85));
        assert_eq!(geometry.tile_center((0, 0), 2.0), (58, 28));
    }

    #[test]
    fn safe_and_dangerous_tiles_get_clicked() {
        let board = board(&["F??", "?1?", "???"]);
        let out = build_hint_map(&board, AnalysisConfig::default());
        let geometry = GridGeometry::from_origin((0, 0), 10, board.size());

        let actions = build_click_plan(&board, &out.hints, &geometry, 1.0, false);

        assert_eq!(actions.len(), 7);
        assert!(
            actions
                .iter()
                .all(|action| action.button == ClickButton::Left
                    && action.reason == ClickReason::Safe)
        );
    }

    #[test]
    fn deduced_mines_get_right_clicked() {
        let board = board(&["1?"]);
        let out = build_hint_map(&board, AnalysisConfig::default());
        let geometry = GridGeometry::from_origin((0, 0), 10, board.size());

        let actions = build_click_plan(&board, &out.hints, &geometry, 1.0, false);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].button, ClickButton::Right);
        assert_eq!(actions[0].reason, ClickReason::Mine);
        assert_eq!(actions[0].coords, (0, 1));
    }

    #[test]
    fn confirmed_wrong_flags_get_unflagged_but_suspects_are_left_alone() {
        let mut hints = minehint_core::HintMap::new((1, 2));
        hints.annotate((0, 0), Annotation::SuspectFlag, ConflictPolicy::Monotone);
        hints.annotate((0, 1), Annotation::SuspectFlag, ConflictPolicy::Monotone);
        hints.annotate(
            (0, 1),
            Annotation::ConfirmedWrongFlag,
            ConflictPolicy::Monotone,
        );
        let board = board(&["FF"]);
        let geometry = GridGeometry::from_origin((0, 0), 10, board.size());

        let actions = build_click_plan(&board, &hints, &geometry, 1.0, false);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].coords, (0, 1));
        assert_eq!(actions[0].reason, ClickReason::WrongFlag);
    }

    #[test]
    fn speculative_click_fires_only_on_an_empty_plan() {
        let board = board(&["2?", "??"]);
        let out = build_hint_map(&board, AnalysisConfig::default());
        let geometry = GridGeometry::from_origin((0, 0), 10, board.size());

        let without = build_click_plan(&board, &out.hints, &geometry, 1.0, false);
        let with = build_click_plan(&board, &out.hints, &geometry, 1.0, true);

        assert!(without.is_empty());
        assert_eq!(with.len(), 1);
        assert_eq!(with[0].reason, ClickReason::Speculative);
        assert_eq!(with[0].coords, (0, 1));
    }

    #[test]
    fn speculation_is_skipped_when_deductions_exist() {
        let board = board(&["1?"]);
        let out = build_hint_map(&board, AnalysisConfig::default());
        let geometry = GridGeometry::from_origin((0, 0), 10, board.size());

        let actions = build_click_plan(&board, &out.hints, &geometry, 1.0, true);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].reason, ClickReason::Mine);
    }
}
