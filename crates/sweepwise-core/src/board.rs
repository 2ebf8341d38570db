//! The board model.
//!
//! [`Board`] is a fixed-size, row-major grid of [`Tile`]s. It is pure data plus
//! neighbor queries; every deduction lives in the solver crate.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use tinyvec::ArrayVec;

use crate::{BoardError, Dimensions, Position, Tile};

/// Up to eight neighboring positions, in row-major order.
pub type Neighbors = ArrayVec<[Position; 8]>;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size grid of tile states.
///
/// The dimensions never change after construction. Indexing with an
/// out-of-bounds [`Position`] panics; [`Board::get`] and [`Board::set`] are the
/// checked alternatives.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Dimensions, Position, Tile};
///
/// let mut board = Board::new(Dimensions::new(2, 3));
/// assert_eq!(board.covered_count(), 6);
///
/// board.set(Position::new(0, 0), Tile::Flagged)?;
/// assert_eq!(board.flagged_neighbor_count(Position::new(1, 1)), 1);
/// # Ok::<(), sweepwise_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: Dimensions,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates a board of the given size with every tile covered.
    #[must_use]
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            tiles: vec![Tile::Covered; dims.area()],
        }
    }

    /// Builds a board from rows of tiles.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Empty`] if there are no rows or the first row is
    /// empty, and [`BoardError::RaggedRow`] if the rows differ in length.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, BoardError>
    where
        R: IntoIterator<Item = Tile>,
    {
        let mut tiles = Vec::new();
        let mut cols = None;
        let mut row_count = 0;
        for (row, tiles_in_row) in rows.into_iter().enumerate() {
            let before = tiles.len();
            tiles.extend(tiles_in_row);
            let actual = tiles.len() - before;
            let expected = *cols.get_or_insert(actual);
            if actual != expected {
                return Err(BoardError::RaggedRow {
                    row,
                    expected,
                    actual,
                });
            }
            row_count += 1;
        }
        let cols = cols.unwrap_or(0);
        if row_count == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }
        Ok(Self {
            dims: Dimensions::new(row_count, cols),
            tiles,
        })
    }

    /// Returns the board size.
    #[must_use]
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Returns the tile at a position, or `None` if it is out of bounds.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.dims.index_of(pos).map(|i| self.tiles[i])
    }

    /// Overwrites the tile at a position and returns the previous tile.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is off the board.
    pub fn set(&mut self, pos: Position, tile: Tile) -> Result<Tile, BoardError> {
        let i = self.dims.index_of(pos).ok_or(BoardError::OutOfBounds {
            pos,
            dims: self.dims,
        })?;
        Ok(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Replaces every tile with the tiles of another board of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DimensionMismatch`] if the sizes differ; the
    /// board is left untouched in that case.
    pub fn overwrite_from(&mut self, other: &Board) -> Result<(), BoardError> {
        if other.dims != self.dims {
            return Err(BoardError::DimensionMismatch {
                expected: self.dims,
                actual: other.dims,
            });
        }
        self.tiles.copy_from_slice(&other.tiles);
        Ok(())
    }

    /// Returns an iterator over every position in row-major order.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = Position> + Clone + use<> {
        self.dims.positions()
    }

    /// Returns an iterator over `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.dims.positions().zip(self.tiles.iter().copied())
    }

    /// Returns every numbered tile together with its number, in row-major order.
    pub fn numbered(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        self.iter()
            .filter_map(|(pos, tile)| tile.number().map(|n| (pos, n)))
    }

    /// Returns every covered position in row-major order.
    pub fn covered(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter_map(|(pos, tile)| tile.is_covered().then_some(pos))
    }

    /// Returns the number of covered tiles.
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_covered()).count()
    }

    /// Returns `true` if no tile is covered.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        !self.tiles.iter().any(|tile| tile.is_covered())
    }

    /// Returns the in-bounds neighbors of a position, in row-major order.
    ///
    /// Out-of-bounds positions have no neighbors.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        let mut neighbors = Neighbors::new();
        if !self.dims.contains(pos) {
            return neighbors;
        }
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (Some(row), Some(col)) = (
                pos.row().checked_add_signed(dr),
                pos.col().checked_add_signed(dc),
            ) else {
                continue;
            };
            let neighbor = Position::new(row, col);
            if self.dims.contains(neighbor) {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }

    /// Returns the neighbors of a position whose tile satisfies a predicate.
    #[must_use]
    pub fn neighbors_where(&self, pos: Position, mut pred: impl FnMut(&Tile) -> bool) -> Neighbors {
        self.neighbors(pos)
            .into_iter()
            .filter(|&n| pred(&self[n]))
            .collect()
    }

    /// Returns the covered neighbors of a position.
    #[must_use]
    pub fn covered_neighbors(&self, pos: Position) -> Neighbors {
        self.neighbors_where(pos, Tile::is_covered)
    }

    /// Returns the number of flagged neighbors of a position.
    #[must_use]
    pub fn flagged_neighbor_count(&self, pos: Position) -> usize {
        self.neighbors(pos)
            .into_iter()
            .filter(|&n| self[n].is_flagged())
            .count()
    }

    /// Returns the mines a numbered tile still needs among its covered neighbors.
    ///
    /// This is the tile's number minus its flagged neighbors. The value is
    /// negative when more flags surround the tile than its number allows.
    /// Returns `None` if the tile is not a number.
    #[must_use]
    pub fn remaining_mines(&self, pos: Position) -> Option<i32> {
        let n = self.get(pos)?.number()?;
        let flagged = i32::try_from(self.flagged_neighbor_count(pos)).unwrap_or(i32::MAX);
        Some(i32::from(n) - flagged)
    }

    /// Returns the rows of the board as slices.
    ///
    /// A board without columns has no rows to yield.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.dims.cols.max(1))
    }
}

impl Index<Position> for Board {
    type Output = Tile;

    fn index(&self, pos: Position) -> &Self::Output {
        let i = self
            .dims
            .index_of(pos)
            .unwrap_or_else(|| panic!("position {pos} is outside a {} board", self.dims));
        &self.tiles[i]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let i = self
            .dims
            .index_of(pos)
            .unwrap_or_else(|| panic!("position {pos} is outside a {} board", self.dims));
        &mut self.tiles[i]
    }
}

/// Parses the board text format.
///
/// One line per row; whitespace inside a line and blank lines are ignored.
/// `_` is covered, `F` flagged, `1`-`8` numbers, `.` opened-unknown and `P`
/// pending.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .enumerate()
            .map(|(row, chars)| {
                chars
                    .into_iter()
                    .enumerate()
                    .map(|(col, ch)| {
                        Tile::from_symbol(ch).ok_or(BoardError::InvalidTile { ch, row, col })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}
