use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unknown tile symbol {symbol:?}")]
    UnknownSymbol { symbol: char },
    #[error("row {row} holds {len} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("board exceeds {max}x{max} tiles")]
    TooLarge { max: Coord },
}

pub type Result<T> = core::result::Result<T, BoardError>;
