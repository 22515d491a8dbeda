#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use error::*;
pub use hint::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod error;
mod hint;
mod tile;
mod types;

/// One observed board snapshot, immutable for the duration of a deduction
/// cycle. The engine assumes the grid is rectangular and every cell is
/// classified; it makes no claim that the position is a legal game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<TileState>,
}

impl Board {
    pub fn new(tiles: Array2<TileState>) -> Result<Self> {
        let max = usize::from(Coord::MAX);
        let dim = tiles.dim();
        if dim.0 > max || dim.1 > max {
            return Err(BoardError::TooLarge { max: Coord::MAX });
        }
        Ok(Self { tiles })
    }

    /// Parses one row per string using the sensor symbol alphabet:
    /// `?` covered, `F` flagged, `#` unreadable, `0`-`8` revealed.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let expected = rows.first().map_or(0, |row| row.chars().count());
        let mut tiles = alloc::vec::Vec::with_capacity(rows.len() * expected);

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(BoardError::RaggedRow { row, len, expected });
            }
            for symbol in line.chars() {
                tiles.push(TileState::from_symbol(symbol)?);
            }
        }

        let max = usize::from(Coord::MAX);
        if rows.len() > max || expected > max {
            return Err(BoardError::TooLarge { max: Coord::MAX });
        }

        let tiles = Array2::from_shape_vec((rows.len(), expected), tiles)
            .expect("row-major tile vec should match shape");
        Self::new(tiles)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (
            dim.0.try_into().expect("board rows should fit in Coord"),
            dim.1.try_into().expect("board cols should fit in Coord"),
        )
    }

    pub fn tile_at(&self, coords: Coord2) -> TileState {
        self[coords]
    }

    /// The mine quota at `coords`, if the tile is a numbered clue.
    pub fn clue_at(&self, coords: Coord2) -> Option<u8> {
        self[coords].clue()
    }

    /// All numbered tiles in row-major order, the deterministic sweep order
    /// of the deduction passes.
    pub fn iter_clues(&self) -> impl Iterator<Item = (Coord2, u8)> + '_ {
        self.tiles.indexed_iter().filter_map(|((row, col), tile)| {
            tile.clue().map(|clue| ((row as Coord, col as Coord), clue))
        })
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = TileState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_index()]
    }
}
