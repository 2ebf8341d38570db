//! Board coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on the board.
///
/// Positions are ordered row-major: first by `row`, then by `col`. Every
/// deterministic tie-break in the solver relies on this ordering.
///
/// # Examples
///
/// ```
/// use sweepwise_core::Position;
///
/// let a = Position::new(0, 5);
/// let b = Position::new(1, 0);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "(0, 5)");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column index.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns `true` if the two positions are distinct and touch, including diagonally.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The size of a board, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{rows}x{cols}")]
pub struct Dimensions {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Dimensions {
    /// Creates dimensions from a row and a column count.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Returns the number of cells.
    #[must_use]
    pub const fn area(self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if the position lies on a board of this size.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Returns the row-major index of a position.
    ///
    /// Returns `None` if the position is out of bounds.
    #[must_use]
    pub const fn index_of(self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Returns an iterator over every position in row-major order.
    pub fn positions(self) -> impl DoubleEndedIterator<Item = Position> + Clone {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Returns the cell at the middle of the board.
    #[must_use]
    pub const fn center(self) -> Position {
        Position::new(self.rows / 2, self.cols / 2)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
            Position::new(2, 0),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_adjacency() {
        let center = Position::new(1, 1);
        assert!(center.is_adjacent(Position::new(0, 0)));
        assert!(center.is_adjacent(Position::new(2, 1)));
        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Position::new(3, 1)));
    }

    #[test]
    fn test_index_of_out_of_bounds() {
        let dims = Dimensions::new(2, 3);
        assert_eq!(dims.index_of(Position::new(1, 2)), Some(5));
        assert_eq!(dims.index_of(Position::new(2, 0)), None);
        assert_eq!(dims.index_of(Position::new(0, 3)), None);
    }

    #[test]
    fn test_positions_cover_area() {
        let dims = Dimensions::new(3, 4);
        let positions: Vec<_> = dims.positions().collect();
        assert_eq!(positions.len(), dims.area());
        assert!(positions.is_sorted());
    }

    proptest! {
        #[test]
        fn prop_index_of_matches_enumeration(rows in 1usize..20, cols in 1usize..20) {
            let dims = Dimensions::new(rows, cols);
            for (i, pos) in dims.positions().enumerate() {
                prop_assert_eq!(dims.index_of(pos), Some(i));
            }
        }
    }
}
