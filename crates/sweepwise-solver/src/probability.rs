use std::collections::BTreeMap;

use rand::seq::IndexedRandom as _;
use sweepwise_core::{Board, Position};

/// How a guess was chosen.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum GuessBasis {
    /// The cell had the lowest averaged local mine likelihood.
    Estimated {
        /// The averaged likelihood of the chosen cell.
        score: f64,
    },
    /// No number constrained any covered cell, so the pick was uniform.
    Uniform {
        /// Number of covered cells the pick was drawn from.
        candidates: usize,
    },
}

/// A covered cell picked to be revealed without proof.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guess {
    /// The cell to reveal.
    pub pos: Position,
    /// How the cell was chosen.
    pub basis: GuessBasis,
}

/// Ranks covered cells by a local estimate of their mine likelihood.
///
/// Every numbered tile with mines still to place spreads them evenly over
/// its covered neighbors. A cell seen by several numbers scores the
/// arithmetic mean of their contributions. This is a heuristic, not a joint
/// probability.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Position};
/// use sweepwise_solver::ProbabilityEstimator;
///
/// let board: Board = "
///     __.
///     _1.
///     ...
/// "
/// .parse()?;
///
/// let scores = ProbabilityEstimator::new().scores(&board);
/// assert_eq!(scores.len(), 3);
/// assert!((scores[&Position::new(0, 0)] - 1.0 / 3.0).abs() < f64::EPSILON);
/// # Ok::<(), sweepwise_core::BoardError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ProbabilityEstimator;

impl ProbabilityEstimator {
    /// Creates a new estimator.
    #[must_use]
    pub const fn new() -> Self {
        ProbabilityEstimator
    }

    /// Returns the averaged score of every covered cell that some number touches.
    #[must_use]
    pub fn scores(&self, board: &Board) -> BTreeMap<Position, f64> {
        let mut sums: BTreeMap<Position, (f64, u32)> = BTreeMap::new();
        for (pos, _) in board.numbered() {
            let Some(remaining) = board.remaining_mines(pos).filter(|&r| r > 0) else {
                continue;
            };
            let covered = board.covered_neighbors(pos);
            let Ok(count) = u32::try_from(covered.len()) else {
                continue;
            };
            if count == 0 {
                continue;
            }
            let p = f64::from(remaining) / f64::from(count);
            for cell in covered {
                let entry = sums.entry(cell).or_default();
                entry.0 += p;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(pos, (sum, n))| (pos, sum / f64::from(n)))
            .collect()
    }

    /// Picks the covered cell least likely to be a mine.
    ///
    /// Ties go to the first cell in row-major order. If no number constrains
    /// any covered cell, a covered cell is drawn uniformly from `rng`.
    /// Returns `None` if the board has no covered cells.
    pub fn guess<R>(&self, board: &Board, rng: &mut R) -> Option<Guess>
    where
        R: rand::Rng + ?Sized,
    {
        let mut best: Option<(Position, f64)> = None;
        for (pos, score) in self.scores(board) {
            if best.is_none_or(|(_, s)| score.total_cmp(&s).is_lt()) {
                best = Some((pos, score));
            }
        }
        if let Some((pos, score)) = best {
            return Some(Guess {
                pos,
                basis: GuessBasis::Estimated { score },
            });
        }

        let covered: Vec<_> = board.covered().collect();
        let &pos = covered.choose(rng)?;
        Some(Guess {
            pos,
            basis: GuessBasis::Uniform {
                candidates: covered.len(),
            },
        })
    }
}
