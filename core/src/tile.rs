use serde::{Deserialize, Serialize};

use crate::{BoardError, Result};

/// One cell of a board snapshot as classified by the sensor.
///
/// `Unreadable` is kept apart from `Revealed(0)` on purpose: the legacy
/// classifier conflated the two, which silently suppressed deductions. A
/// tile the sensor could not classify yields no deductions at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Covered,
    Flagged,
    Revealed(u8),
    Unreadable,
}

impl TileState {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// The mine quota of a numbered tile. `Revealed(0)` carries no
    /// constraint and is not a clue.
    pub const fn clue(self) -> Option<u8> {
        match self {
            Self::Revealed(count) if count > 0 => Some(count),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '?' => Ok(Self::Covered),
            'F' => Ok(Self::Flagged),
            '#' => Ok(Self::Unreadable),
            '0'..='8' => Ok(Self::Revealed(symbol as u8 - b'0')),
            _ => Err(BoardError::UnknownSymbol { symbol }),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Covered => '?',
            Self::Flagged => 'F',
            Self::Unreadable => '#',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Covered
    }
}
