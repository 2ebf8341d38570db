//! Exhaustive constraint search over connected components.
//!
//! [`CspSolver`] decomposes the board's constraints into independent
//! [`Component`]s, searches each on a worker pool and merges the variables
//! that are invariant across all solutions. The whole batch shares a single
//! deadline; components that miss it are reported as timed out and
//! contribute nothing.

use std::{
    collections::BTreeSet,
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

use rayon::{ThreadPool, ThreadPoolBuilder};
use sweepwise_core::{Board, Position};

pub use self::search::{Certainties, ComponentOutcome};
use crate::{Component, ConstraintSet, SolverError, decompose};

mod search;

/// Limits applied to each constraint search batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspConfig {
    /// Components with more variables than this are skipped.
    pub max_variables: usize,
    /// Enumeration stops, inconclusive, once a component exceeds this many solutions.
    pub solution_cap: usize,
    /// Wall-clock budget for a whole batch.
    pub timeout: Duration,
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            max_variables: 50,
            solution_cap: 1000,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Merged result of one search batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspReport {
    mines: BTreeSet<Position>,
    safes: BTreeSet<Position>,
    outcomes: Vec<ComponentOutcome>,
}

impl CspReport {
    /// Returns the variables proven to be mines.
    #[must_use]
    pub fn mines(&self) -> &BTreeSet<Position> {
        &self.mines
    }

    /// Returns the variables proven to be safe.
    #[must_use]
    pub fn safes(&self) -> &BTreeSet<Position> {
        &self.safes
    }

    /// Returns the outcome of each component, in decomposition order.
    #[must_use]
    pub fn outcomes(&self) -> &[ComponentOutcome] {
        &self.outcomes
    }

    /// Returns the number of components that missed the deadline.
    #[must_use]
    pub fn timed_out(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_timed_out()).count()
    }

    /// Returns `true` if nothing was proven.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safes.is_empty()
    }
}

/// Solves constraint components in parallel on a bounded worker pool.
///
/// Cloning the solver shares its pool.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Position};
/// use sweepwise_solver::{CspConfig, CspSolver};
///
/// let board: Board = "
///     1__
///     11_
///     ___
/// "
/// .parse()?;
///
/// let solver = CspSolver::new(CspConfig::default())?;
/// let report = solver.solve_board(&board);
/// assert!(report.mines().contains(&Position::new(0, 1)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CspSolver {
    config: CspConfig,
    pool: Arc<ThreadPool>,
}

impl CspSolver {
    /// Creates a solver with a pool sized to the available parallelism.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::WorkerPool`] if the pool cannot be built.
    pub fn new(config: CspConfig) -> Result<Self, SolverError> {
        Self::with_threads(config, None)
    }

    /// Creates a solver with a pool of `threads` workers.
    ///
    /// `None` lets the pool pick its own size.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::WorkerPool`] if the pool cannot be built.
    pub fn with_threads(config: CspConfig, threads: Option<usize>) -> Result<Self, SolverError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .thread_name(|i| format!("sweepwise-csp-{i}"))
            .build()?;
        Ok(Self::with_pool(config, Arc::new(pool)))
    }

    /// Creates a solver that runs on an existing pool.
    #[must_use]
    pub fn with_pool(config: CspConfig, pool: Arc<ThreadPool>) -> Self {
        Self { config, pool }
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &CspConfig {
        &self.config
    }

    /// Builds, decomposes and solves the constraints of a board.
    #[must_use]
    pub fn solve_board(&self, board: &Board) -> CspReport {
        let set = ConstraintSet::from_board(board);
        let components = decompose(&set);
        log::debug!(
            "csp: {} constraints over {} variables in {} components",
            set.len(),
            set.variables().count(),
            components.len()
        );
        self.solve(components)
    }

    /// Solves every component and merges the certainties.
    ///
    /// All components are submitted at once and awaited with one deadline.
    /// Results that arrive late are discarded.
    #[must_use]
    pub fn solve(&self, components: Vec<Component>) -> CspReport {
        let total = components.len();
        let deadline = Instant::now() + self.config.timeout;
        let (tx, rx) = mpsc::channel();

        for (index, component) in components.into_iter().enumerate() {
            let tx = tx.clone();
            let config = self.config.clone();
            self.pool.spawn(move || {
                let outcome = search::solve_component(&component, &config, Some(deadline));
                // The receiver is gone once the batch has timed out.
                let _ = tx.send((index, outcome));
            });
        }
        drop(tx);

        let mut outcomes = vec![None; total];
        let mut received = 0;
        while received < total {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((index, outcome)) => {
                    outcomes[index] = Some(outcome);
                    received += 1;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "csp: batch timed out after {:?}, {} of {total} components abandoned",
                        self.config.timeout,
                        total - received
                    );
                    break;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        let mut report = CspReport::default();
        for outcome in outcomes {
            let outcome = outcome.unwrap_or(ComponentOutcome::TimedOut);
            match &outcome {
                ComponentOutcome::Solved(certainties) => {
                    report.mines.extend(certainties.mines());
                    report.safes.extend(certainties.safes());
                }
                ComponentOutcome::TooLarge { variables } => {
                    log::debug!("csp: skipped component with {variables} variables");
                }
                ComponentOutcome::CapExceeded { cap } => {
                    log::debug!("csp: component exceeded {cap} solutions");
                }
                ComponentOutcome::Unsatisfiable => {
                    log::warn!("csp: component has no consistent assignment");
                }
                ComponentOutcome::TimedOut => {}
            }
            report.outcomes.push(outcome);
        }
        report
    }
}
