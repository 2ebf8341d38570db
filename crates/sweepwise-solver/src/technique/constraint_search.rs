use sweepwise_core::Board;

use super::{BoxedTechnique, Technique};
use crate::{CspSolver, Moves};

const NAME: &str = "constraint search";

/// A technique that runs the exhaustive component search.
///
/// Cells that are a mine in every solution are flagged and cells that are
/// safe in every solution are revealed. Components that are too large,
/// exceed the solution cap or miss the deadline contribute nothing.
#[derive(Debug, Clone)]
pub struct ConstraintSearch {
    solver: CspSolver,
}

impl ConstraintSearch {
    /// Creates the technique on top of a solver and its worker pool.
    #[must_use]
    pub fn new(solver: CspSolver) -> Self {
        Self { solver }
    }
}

impl Technique for ConstraintSearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(self.clone())
    }

    fn apply(&self, board: &mut Board) -> Moves {
        let report = self.solver.solve_board(board);
        Moves::from_parts(report.mines().iter().copied(), report.safes().iter().copied())
            .apply_to(board)
    }
}
