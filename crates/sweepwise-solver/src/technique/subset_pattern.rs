use std::collections::BTreeSet;

use sweepwise_core::{Board, Position};

use super::{BoxedTechnique, Technique};
use crate::Moves;

const NAME: &str = "subset pattern";

/// A technique that compares adjacent numbers whose covered neighbors nest.
///
/// For an ordered pair of adjacent numbered tiles A and B, let `eff` be each
/// tile's number minus its flagged neighbors. If B's covered neighbors are a
/// strict subset of A's, the cells only A sees hold exactly `effA - effB`
/// mines:
///
/// - a difference of `0` makes every such cell safe,
/// - a difference equal to their count makes every such cell a mine.
///
/// Pairs whose counts cannot be satisfied are skipped. A cell that two pairs
/// disagree about is left alone.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Position, Tile};
/// use sweepwise_solver::technique::{SubsetPattern, Technique};
///
/// let mut board: Board = "
///     ___.
///     .21.
///     ....
/// "
/// .parse()?;
///
/// let moves = SubsetPattern::new().apply(&mut board);
/// assert_eq!(moves.flags().len(), 1);
/// assert_eq!(board[Position::new(0, 0)], Tile::Flagged);
/// # Ok::<(), sweepwise_core::BoardError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SubsetPattern;

impl SubsetPattern {
    /// Creates a new `SubsetPattern` technique.
    #[must_use]
    pub const fn new() -> Self {
        SubsetPattern
    }
}

/// A numbered tile with its covered neighbors and effective count.
#[derive(Debug)]
struct Clue {
    pos: Position,
    remaining: i32,
    covered: BTreeSet<Position>,
}

impl Clue {
    fn collect(board: &Board) -> Vec<Self> {
        board
            .numbered()
            .filter_map(|(pos, _)| {
                let remaining = board.remaining_mines(pos)?;
                let covered: BTreeSet<_> = board.covered_neighbors(pos).into_iter().collect();
                let covered_len = i32::try_from(covered.len()).ok()?;
                (0..=covered_len)
                    .contains(&remaining)
                    .then_some(Self {
                        pos,
                        remaining,
                        covered,
                    })
            })
            .collect()
    }
}

impl Technique for SubsetPattern {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, board: &mut Board) -> Moves {
        let clues = Clue::collect(board);

        let mut mines = BTreeSet::new();
        let mut safes = BTreeSet::new();
        for a in &clues {
            for b in &clues {
                if !a.pos.is_adjacent(b.pos)
                    || b.covered.len() >= a.covered.len()
                    || !b.covered.is_subset(&a.covered)
                {
                    continue;
                }
                let diff: Vec<_> = a.covered.difference(&b.covered).copied().collect();
                let count = a.remaining - b.remaining;
                let Ok(diff_len) = i32::try_from(diff.len()) else {
                    continue;
                };
                if count == 0 {
                    safes.extend(diff);
                } else if count == diff_len {
                    mines.extend(diff);
                }
            }
        }

        let conflicts: Vec<_> = mines.intersection(&safes).copied().collect();
        if !conflicts.is_empty() {
            log::warn!("{NAME}: conflicting deductions for {conflicts:?}, skipping them");
            for pos in &conflicts {
                mines.remove(pos);
                safes.remove(pos);
            }
        }

        Moves::from_parts(mines, safes).apply_to(board)
    }
}
