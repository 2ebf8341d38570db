//! Deduction techniques.
//!
//! Each technique implements the [`Technique`] trait and turns a board into
//! proven [`Moves`]. Techniques mark their moves on the board as they find
//! them, so a later technique in the same cycle never targets the same cell.

use std::fmt::Debug;

use sweepwise_core::Board;

pub use self::{
    constraint_search::ConstraintSearch, neighbor_count::NeighborCount,
    subset_pattern::SubsetPattern,
};
use crate::{CspSolver, Moves};

mod constraint_search;
mod neighbor_count;
mod subset_pattern;

/// Returns the cheap techniques that only look at a tile and its neighbors.
///
/// - **Neighbor count**: flag-complete and open-complete numbers
/// - **Subset pattern**: differences between nested covered-neighbor sets
///
/// # Examples
///
/// ```
/// use sweepwise_solver::technique;
///
/// let techniques = technique::local_techniques();
/// assert_eq!(techniques.len(), 2);
/// ```
#[must_use]
pub fn local_techniques() -> Vec<BoxedTechnique> {
    vec![Box::new(NeighborCount::new()), Box::new(SubsetPattern::new())]
}

/// Returns every deduction technique, cheapest first.
///
/// The constraint search runs on the given solver's worker pool.
#[must_use]
pub fn all_techniques(csp: CspSolver) -> Vec<BoxedTechnique> {
    let mut techniques = local_techniques();
    techniques.push(Box::new(ConstraintSearch::new(csp)));
    techniques
}

/// A trait representing a Minesweeper deduction technique.
pub trait Technique: Debug + Send + Sync {
    /// Returns the name of the technique.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Applies the technique to a board.
    ///
    /// Flags are marked [`Flagged`](sweepwise_core::Tile::Flagged) and reveals
    /// [`Pending`](sweepwise_core::Tile::Pending) on the board. Returns the
    /// moves that were made; an empty set means the technique found nothing.
    fn apply(&self, board: &mut Board) -> Moves;

    /// Finds the moves this technique would make without mutating the board.
    fn find_moves(&self, board: &Board) -> Moves {
        let mut scratch = board.clone();
        self.apply(&mut scratch)
    }
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
