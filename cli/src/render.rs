use minehint_core::{Board, HintMap};

/// Text analog of the on-screen color overlay: annotated cells show their
/// annotation glyph, everything else its observed board symbol.
pub fn render_overlay(board: &Board, hints: &HintMap) -> String {
    let (rows, cols) = board.size();
    let mut out = String::with_capacity((usize::from(cols) + 1) * usize::from(rows));

    for row in 0..rows {
        for col in 0..cols {
            let annotation = hints.annotation_at((row, col));
            out.push(if annotation.is_resolved() {
                annotation.glyph()
            } else {
                board.tile_at((row, col)).symbol()
            });
        }
        out.push('\n');
    }

    out
}
