use std::collections::BTreeSet;

use sweepwise_core::{Board, Position, Tile};

use super::{BoxedTechnique, Technique};
use crate::Moves;

const NAME: &str = "neighbor count";

/// A technique that resolves numbers whose neighborhood is already complete.
///
/// Two passes run over every numbered tile:
///
/// 1. **Flag pass**: if the number equals the count of covered plus flagged
///    neighbors, every covered neighbor is a mine.
/// 2. **Reveal pass**: if the number equals the count of flagged neighbors,
///    every covered neighbor is safe.
///
/// The flag pass is marked on the board before the reveal pass runs, so the
/// reveal pass counts the new flags.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Position, Tile};
/// use sweepwise_solver::technique::{NeighborCount, Technique};
///
/// let mut board: Board = "
///     1_
///     11
/// "
/// .parse()?;
///
/// let moves = NeighborCount::new().apply(&mut board);
/// assert!(moves.flags().contains(&Position::new(0, 1)));
/// assert_eq!(board[Position::new(0, 1)], Tile::Flagged);
/// # Ok::<(), sweepwise_core::BoardError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NeighborCount;

impl NeighborCount {
    /// Creates a new `NeighborCount` technique.
    #[must_use]
    pub const fn new() -> Self {
        NeighborCount
    }

    fn flag_pass(board: &Board) -> BTreeSet<Position> {
        let mut flags = BTreeSet::new();
        for (pos, n) in board.numbered() {
            let unopened = board.neighbors_where(pos, |t| t.is_covered() || t.is_flagged());
            if usize::from(n) == unopened.len() {
                flags.extend(unopened.into_iter().filter(|&p| board[p] == Tile::Covered));
            }
        }
        flags
    }

    fn reveal_pass(board: &Board) -> BTreeSet<Position> {
        let mut reveals = BTreeSet::new();
        for (pos, n) in board.numbered() {
            if usize::from(n) == board.flagged_neighbor_count(pos) {
                reveals.extend(board.covered_neighbors(pos));
            }
        }
        reveals
    }
}

impl Technique for NeighborCount {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, board: &mut Board) -> Moves {
        let flags = Self::flag_pass(board);
        let mut applied = Moves::from_parts(flags, []).apply_to(board);

        let reveals = Self::reveal_pass(board);
        applied.extend(Moves::from_parts([], reveals).apply_to(board));
        applied
    }
}
