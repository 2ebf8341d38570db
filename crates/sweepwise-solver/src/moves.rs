use std::collections::BTreeSet;

use sweepwise_core::{Board, Position, Tile};

/// The actions decided in one cycle: cells to flag and cells to reveal.
///
/// Both sets are kept sorted row-major so the dispatch order is stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Moves {
    flags: BTreeSet<Position>,
    reveals: BTreeSet<Position>,
}

impl Moves {
    /// Creates an empty move set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a move set from flag and reveal positions.
    #[must_use]
    pub fn from_parts(
        flags: impl IntoIterator<Item = Position>,
        reveals: impl IntoIterator<Item = Position>,
    ) -> Self {
        Self {
            flags: flags.into_iter().collect(),
            reveals: reveals.into_iter().collect(),
        }
    }

    /// Creates a move set revealing a single cell.
    #[must_use]
    pub fn reveal_one(pos: Position) -> Self {
        Self::from_parts([], [pos])
    }

    /// Returns the cells to flag.
    #[must_use]
    pub fn flags(&self) -> &BTreeSet<Position> {
        &self.flags
    }

    /// Returns the cells to reveal.
    #[must_use]
    pub fn reveals(&self) -> &BTreeSet<Position> {
        &self.reveals
    }

    /// Returns `true` if there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.reveals.is_empty()
    }

    /// Returns the total number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len() + self.reveals.len()
    }

    /// Adds all actions of another move set.
    pub fn extend(&mut self, other: Moves) {
        self.flags.extend(other.flags);
        self.reveals.extend(other.reveals);
    }

    /// Marks the moves on the board: flags first, then reveals.
    ///
    /// Only covered cells are touched. Flagged cells become [`Tile::Flagged`]
    /// and revealed cells become [`Tile::Pending`] until the next board read
    /// confirms them. Returns the moves that actually changed the board.
    pub fn apply_to(&self, board: &mut Board) -> Moves {
        let mut applied = Moves::new();
        for &pos in &self.flags {
            if board.get(pos) == Some(Tile::Covered) {
                board[pos] = Tile::Flagged;
                applied.flags.insert(pos);
            }
        }
        for &pos in &self.reveals {
            if board.get(pos) == Some(Tile::Covered) {
                board[pos] = Tile::Pending;
                applied.reveals.insert(pos);
            }
        }
        applied
    }
}
