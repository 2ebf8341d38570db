use crate::{Dimensions, Position};

/// Errors produced while building or updating a [`Board`](crate::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The board has no rows or no columns.
    #[display("board must have at least one row and one column")]
    Empty,
    /// A row has a different length from the first row.
    #[display("row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Expected tile count.
        expected: usize,
        /// Actual tile count.
        actual: usize,
    },
    /// A character in the text format does not denote a tile.
    #[display("invalid tile character {ch:?} at row {row}, column {col}")]
    InvalidTile {
        /// The offending character.
        ch: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },
    /// A grid of the wrong size was supplied.
    #[display("board dimensions {actual} do not match expected {expected}")]
    DimensionMismatch {
        /// Dimensions the receiver was created with.
        expected: Dimensions,
        /// Dimensions of the supplied grid.
        actual: Dimensions,
    },
    /// A position lies outside the board.
    #[display("position {pos} is outside a {dims} board")]
    OutOfBounds {
        /// The offending position.
        pos: Position,
        /// The board size.
        dims: Dimensions,
    },
}
