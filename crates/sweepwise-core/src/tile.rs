//! Per-cell tile state.

use std::fmt::{self, Display};

/// The state of a single cell as last read from the game.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Tile {
    /// Believed to be a mine; marked but never clicked.
    Flagged,
    /// Revealed, showing the number of adjacent mines (1-8).
    Number(u8),
    /// Neither revealed nor flagged.
    #[default]
    Covered,
    /// Revealed, but its content could not be classified.
    ///
    /// Blank revealed cells also land here. Such cells never produce
    /// constraints.
    OpenedUnknown,
    /// Acted on during the current cycle; provisional until the next board read.
    Pending,
}

impl Tile {
    /// Largest number a revealed tile can show.
    pub const MAX_NUMBER: u8 = 8;

    /// Returns the tile's number if it is a revealed number tile.
    #[must_use]
    #[inline]
    pub const fn number(self) -> Option<u8> {
        match self {
            Tile::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the text symbol used by the board text format.
    ///
    /// Numbers outside `1..=8` render as `#`, which does not parse back.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Tile::Flagged => 'F',
            Tile::Number(n @ 1..=Self::MAX_NUMBER) => (b'0' + n) as char,
            Tile::Number(_) => '#',
            Tile::Covered => '_',
            Tile::OpenedUnknown => '.',
            Tile::Pending => 'P',
        }
    }

    /// Parses a symbol from the board text format.
    ///
    /// Returns `None` for characters that do not denote a tile.
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'F' | 'f' => Some(Tile::Flagged),
            '1'..='8' => Some(Tile::Number(ch as u8 - b'0')),
            '_' => Some(Tile::Covered),
            '.' => Some(Tile::OpenedUnknown),
            'P' | 'p' => Some(Tile::Pending),
            _ => None,
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        let tiles = [
            Tile::Flagged,
            Tile::Number(1),
            Tile::Number(8),
            Tile::Covered,
            Tile::OpenedUnknown,
            Tile::Pending,
        ];
        for tile in tiles {
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
    }

    #[test]
    fn test_zero_and_nine_are_not_tiles() {
        assert_eq!(Tile::from_symbol('0'), None);
        assert_eq!(Tile::from_symbol('9'), None);
        assert_eq!(Tile::from_symbol('x'), None);
    }

    #[test]
    fn test_out_of_range_numbers_render_as_invalid() {
        assert_eq!(Tile::Number(0).symbol(), '#');
        assert_eq!(Tile::Number(9).symbol(), '#');
        assert_eq!(Tile::from_symbol('#'), None);
        for n in 1..=Tile::MAX_NUMBER {
            let tile = Tile::Number(n);
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
    }

    #[test]
    fn test_number_accessor() {
        assert_eq!(Tile::Number(3).number(), Some(3));
        assert_eq!(Tile::Covered.number(), None);
        assert!(Tile::Covered.is_covered());
        assert!(Tile::Pending.is_pending());
    }
}
