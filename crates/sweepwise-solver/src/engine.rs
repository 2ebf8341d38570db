use std::sync::Arc;

use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use rayon::ThreadPool;
use sweepwise_core::{Board, Dimensions};

use crate::{
    CspConfig, CspSolver, Moves, ProbabilityEstimator, SolverError,
    technique::{self, BoxedTechnique},
};

/// The escalation tiers of one decision cycle, cheapest first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Tier {
    /// Neighbor counting.
    #[display("deterministic")]
    Deterministic,
    /// Subset differences between adjacent numbers.
    #[display("pattern")]
    Pattern,
    /// Exhaustive search over constraint components.
    #[display("csp")]
    CspSolve,
    /// Lowest estimated mine likelihood.
    #[display("guess")]
    ProbabilityGuess,
    /// No further action: solved or stuck.
    #[display("terminal")]
    Terminal,
}

impl Tier {
    /// Every tier in escalation order.
    pub const ALL: [Tier; 5] = [
        Tier::Deterministic,
        Tier::Pattern,
        Tier::CspSolve,
        Tier::ProbabilityGuess,
        Tier::Terminal,
    ];

    /// The tiers that only act on proven deductions.
    const DEDUCTIVE: [Tier; 3] = [Tier::Deterministic, Tier::Pattern, Tier::CspSolve];

    const fn index(self) -> usize {
        self as usize
    }
}

/// The outcome of one decision cycle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Decision {
    /// Moves to dispatch, decided by `tier`.
    Act {
        /// The tier that produced the moves.
        tier: Tier,
        /// Flags and reveals to dispatch, flags first.
        moves: Moves,
    },
    /// No covered cells remain.
    Solved,
    /// Covered cells remain but no tier can act.
    Stuck,
}

impl Decision {
    /// Returns the moves if the decision is [`Decision::Act`].
    #[must_use]
    pub fn moves(&self) -> Option<&Moves> {
        match self {
            Self::Act { moves, .. } => Some(moves),
            Self::Solved | Self::Stuck => None,
        }
    }

    /// Returns `true` if no further cycle can make progress.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.is_act()
    }
}

/// Whether a session is still playing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RunState {
    /// Cycles may continue.
    #[default]
    Running,
    /// The caller asked to stop.
    Stopped,
    /// The engine reached a terminal decision.
    Finished,
}

/// Per-run state threaded through [`Engine::decide`].
///
/// Counts cycles and dispatched moves and records whether the run should
/// continue.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    cycles: usize,
    moves: usize,
    state: RunState,
}

impl Session {
    /// Creates a running session with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of decision cycles run.
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Returns the number of flags and reveals decided.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns the run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns `true` while cycles may continue.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Requests the run to stop. A finished session stays finished.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.state = RunState::Stopped;
        }
    }

    fn record(&mut self, decision: &Decision) {
        self.cycles += 1;
        match decision {
            Decision::Act { moves, .. } => self.moves += moves.len(),
            Decision::Solved | Decision::Stuck => self.state = RunState::Finished,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Limits for the constraint search.
    pub csp: CspConfig,
    /// Number of search workers; `None` picks one per available core.
    pub worker_threads: Option<usize>,
    /// Whether to reveal the least likely cell when nothing can be proven.
    ///
    /// When disabled, such cycles end in [`Decision::Stuck`].
    pub guessing: bool,
    /// Seed for the guess random source; `None` draws one at start-up.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            csp: CspConfig::default(),
            worker_threads: None,
            guessing: true,
            seed: None,
        }
    }
}

/// How often each tier produced the decision of a cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EngineStats {
    applications: [usize; Tier::ALL.len()],
}

impl EngineStats {
    /// Returns the number of cycles decided by `tier`.
    #[must_use]
    pub fn applications(&self, tier: Tier) -> usize {
        self.applications[tier.index()]
    }

    /// Returns the number of cycles decided so far.
    #[must_use]
    pub fn total_cycles(&self) -> usize {
        self.applications.iter().sum()
    }

    /// Returns `true` if any cycle produced moves.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.applications[..Tier::Terminal.index()]
            .iter()
            .any(|&n| n > 0)
    }

    fn record(&mut self, tier: Tier) {
        self.applications[tier.index()] += 1;
    }
}

/// The decision engine.
///
/// The engine owns a board of fixed dimensions. Each cycle the caller hands
/// in a fresh reading of the game; the engine copies it, runs the tiers in
/// escalation order on its own copy and returns the first tier's moves.
/// Decided cells are marked on the copy as they are found, so later tiers in
/// the same cycle never target them again.
///
/// # Examples
///
/// ```
/// use sweepwise_core::Board;
/// use sweepwise_solver::{Decision, Engine, EngineConfig, Session};
///
/// let board: Board = "
///     F1
///     11
/// "
/// .parse()?;
///
/// let mut engine = Engine::new(board.dims(), EngineConfig::default())?;
/// let mut session = Session::new();
/// assert_eq!(engine.decide(&board, &mut session)?, Decision::Solved);
/// assert!(!session.is_running());
/// # Ok::<(), sweepwise_solver::SolverError>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    board: Board,
    techniques: Vec<(Tier, BoxedTechnique)>,
    estimator: ProbabilityEstimator,
    rng: Pcg64,
    config: EngineConfig,
    stats: EngineStats,
}

impl Engine {
    /// Creates an engine for boards of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::WorkerPool`] if the search pool cannot be built.
    pub fn new(dims: Dimensions, config: EngineConfig) -> Result<Self, SolverError> {
        let csp = CspSolver::with_threads(config.csp.clone(), config.worker_threads)?;
        Ok(Self::with_solver(dims, config, csp))
    }

    /// Creates an engine whose constraint search runs on an existing pool.
    ///
    /// `config.worker_threads` is ignored.
    #[must_use]
    pub fn with_pool(dims: Dimensions, config: EngineConfig, pool: Arc<ThreadPool>) -> Self {
        let csp = CspSolver::with_pool(config.csp.clone(), pool);
        Self::with_solver(dims, config, csp)
    }

    fn with_solver(dims: Dimensions, config: EngineConfig, csp: CspSolver) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("engine: {dims} board, guess seed {seed}");
        Self {
            board: Board::new(dims),
            techniques: Tier::DEDUCTIVE
                .into_iter()
                .zip(technique::all_techniques(csp))
                .collect(),
            estimator: ProbabilityEstimator::new(),
            rng: Pcg64::seed_from_u64(seed),
            config,
            stats: EngineStats::default(),
        }
    }

    /// Returns the board size.
    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.board.dims()
    }

    /// Returns the engine's board, including the marks of the last cycle.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the engine settings.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tier statistics.
    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Runs one decision cycle on a fresh reading of the game.
    ///
    /// The session's counters are updated and the session is marked
    /// finished on a terminal decision. The session's run state is not
    /// consulted; stopping between cycles is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Board`] if `grid` does not have the engine's
    /// dimensions.
    pub fn decide(&mut self, grid: &Board, session: &mut Session) -> Result<Decision, SolverError> {
        self.board.overwrite_from(grid)?;
        let decision = self.escalate();

        match &decision {
            Decision::Act { tier, moves } => {
                self.stats.record(*tier);
                log::info!(
                    "cycle {}: {tier} decided {} flags and {} reveals",
                    session.cycles() + 1,
                    moves.flags().len(),
                    moves.reveals().len()
                );
            }
            Decision::Solved | Decision::Stuck => {
                self.stats.record(Tier::Terminal);
                log::info!("cycle {}: {decision:?}", session.cycles() + 1);
            }
        }
        session.record(&decision);
        Ok(decision)
    }

    fn escalate(&mut self) -> Decision {
        for (tier, technique) in &self.techniques {
            let moves = technique.apply(&mut self.board);
            if !moves.is_empty() {
                log::debug!("{tier}: {} found {} moves", technique.name(), moves.len());
                return Decision::Act { tier: *tier, moves };
            }
            log::debug!("{tier}: nothing found");
        }

        if self.board.is_fully_resolved() {
            return Decision::Solved;
        }
        if !self.config.guessing {
            log::debug!("guessing disabled with {} covered cells", self.board.covered_count());
            return Decision::Stuck;
        }

        let Some(guess) = self.estimator.guess(&self.board, &mut self.rng) else {
            return Decision::Stuck;
        };
        log::debug!("{}: revealing {} ({:?})", Tier::ProbabilityGuess, guess.pos, guess.basis);
        Decision::Act {
            tier: Tier::ProbabilityGuess,
            moves: Moves::reveal_one(guess.pos).apply_to(&mut self.board),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sweepwise_core::{Position, Tile};

    use super::*;
    use crate::technique::{NeighborCount, Technique};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn config() -> EngineConfig {
        EngineConfig {
            worker_threads: Some(2),
            seed: Some(0),
            ..EngineConfig::default()
        }
    }

    fn decide(input: &str) -> (Decision, Engine, Session) {
        let board: Board = input.parse().unwrap();
        let mut engine = Engine::new(board.dims(), config()).unwrap();
        let mut session = Session::new();
        let decision = engine.decide(&board, &mut session).unwrap();
        (decision, engine, session)
    }

    #[test]
    fn test_deterministic_flag() {
        let (decision, engine, session) = decide("1__\n11_\n___");
        let Decision::Act { tier, moves } = decision else {
            panic!("expected a move, got {decision:?}");
        };
        assert_eq!(tier, Tier::Deterministic);
        assert_eq!(moves.flags().iter().copied().collect::<Vec<_>>(), vec![p(0, 1)]);
        assert_eq!(engine.board()[p(0, 1)], Tile::Flagged);
        assert_eq!(session.moves(), moves.len());
        assert_eq!(engine.stats().applications(Tier::Deterministic), 1);
    }

    #[test]
    fn test_deterministic_reveal() {
        let (decision, engine, _) = decide("F__\n.1.\n...");
        assert_eq!(
            decision,
            Decision::Act {
                tier: Tier::Deterministic,
                moves: Moves::from_parts([], [p(0, 1), p(0, 2)]),
            }
        );
        assert_eq!(engine.board()[p(0, 1)], Tile::Pending);
    }

    #[test]
    fn test_pattern_tier() {
        let (decision, ..) = decide("___.\n.21.\n....");
        assert_eq!(
            decision,
            Decision::Act {
                tier: Tier::Pattern,
                moves: Moves::from_parts([p(0, 0)], []),
            }
        );
    }

    #[test]
    fn test_csp_tier() {
        // Neither local rule applies, but every layout that fits all numbers
        // agrees on these three cells.
        let (decision, ..) = decide(
            "
            ___..
            3_31.
            1___.
            ._1__
            ",
        );
        assert_eq!(
            decision,
            Decision::Act {
                tier: Tier::CspSolve,
                moves: Moves::from_parts([p(0, 0), p(0, 1)], [p(3, 1)]),
            }
        );
    }

    #[test]
    fn test_ambiguous_board_falls_back_to_guess() {
        let (decision, engine, _) = decide("__.\n_1.\n...");
        assert_eq!(
            decision,
            Decision::Act {
                tier: Tier::ProbabilityGuess,
                moves: Moves::reveal_one(p(0, 0)),
            }
        );
        assert_eq!(engine.board()[p(0, 0)], Tile::Pending);
        assert_eq!(engine.stats().applications(Tier::ProbabilityGuess), 1);
    }

    #[test]
    fn test_fresh_board_guess_is_seeded() {
        let board = Board::new(Dimensions::new(9, 9));
        let mut picks = vec![];
        for _ in 0..2 {
            let mut engine = Engine::new(board.dims(), config()).unwrap();
            let decision = engine.decide(&board, &mut Session::new()).unwrap();
            let moves = decision.moves().unwrap().clone();
            assert_eq!(moves.reveals().len(), 1);
            picks.push(moves);
        }
        assert_eq!(picks[0], picks[1]);
    }

    #[test]
    fn test_no_covered_cells_is_solved() {
        let (decision, engine, session) = decide("F1\n11");
        assert_eq!(decision, Decision::Solved);
        assert_eq!(session.state(), RunState::Finished);
        assert_eq!(engine.stats().applications(Tier::Terminal), 1);
        assert!(!engine.stats().has_progress());
    }

    #[test]
    fn test_stuck_without_guessing() {
        let board: Board = "__.\n_1.\n...".parse().unwrap();
        let config = EngineConfig {
            guessing: false,
            ..config()
        };
        let mut engine = Engine::new(board.dims(), config).unwrap();
        let mut session = Session::new();
        assert_eq!(engine.decide(&board, &mut session).unwrap(), Decision::Stuck);
        assert!(session.state().is_finished());
        assert_eq!(engine.board(), &board);
    }

    #[test]
    fn test_wrong_dimensions_are_rejected() {
        let mut engine = Engine::new(Dimensions::new(3, 3), config()).unwrap();
        let board: Board = "__\n__".parse().unwrap();
        let err = engine.decide(&board, &mut Session::new()).unwrap_err();
        assert!(err.is_board());
    }

    #[test]
    fn test_each_cycle_reads_the_new_board() {
        let mut engine = Engine::new(Dimensions::new(3, 3), config()).unwrap();
        let mut session = Session::new();

        let first: Board = "1__\n11_\n___".parse().unwrap();
        engine.decide(&first, &mut session).unwrap();

        // The game confirmed the flag and opened the cells around it.
        let second: Board = "1F1\n111\n...".parse().unwrap();
        assert_eq!(engine.decide(&second, &mut session).unwrap(), Decision::Solved);
        assert_eq!(session.cycles(), 2);
        assert_eq!(engine.stats().total_cycles(), 2);
    }

    #[test]
    fn test_session_stop() {
        let mut session = Session::new();
        assert!(session.is_running());
        session.stop();
        assert_eq!(session.state(), RunState::Stopped);

        let mut finished = Session::new();
        finished.record(&Decision::Solved);
        finished.stop();
        assert_eq!(finished.state(), RunState::Finished);
    }

    /// Builds a board from a mine layout: some safe cells opened, the rest covered.
    fn reveal(dims: Dimensions, mines: &[bool], opened: &[bool]) -> Board {
        let mut board = Board::new(dims);
        for (i, pos) in dims.positions().enumerate() {
            if mines[i] || !opened[i] {
                continue;
            }
            let count = board
                .neighbors(pos)
                .into_iter()
                .filter(|&n| dims.index_of(n).is_some_and(|j| mines[j]))
                .count();
            board[pos] = match u8::try_from(count) {
                Ok(n @ 1..=8) => Tile::Number(n),
                _ => Tile::OpenedUnknown,
            };
        }
        board
    }

    fn layout() -> impl Strategy<Value = (Vec<bool>, Vec<bool>)> {
        (
            prop::collection::vec(prop::bool::weighted(0.2), 16),
            prop::collection::vec(prop::bool::weighted(0.5), 16),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_deductions_agree_with_the_mine_layout((mines, opened) in layout()) {
            let dims = Dimensions::new(4, 4);
            let board = reveal(dims, &mines, &opened);
            let is_mine = |pos: Position| dims.index_of(pos).is_some_and(|i| mines[i]);

            let csp = CspSolver::with_threads(
                CspConfig { solution_cap: usize::MAX, ..CspConfig::default() },
                Some(1),
            ).unwrap();
            let report = csp.solve_board(&board);
            prop_assert!(report.mines().is_disjoint(report.safes()));
            for &pos in report.mines() {
                prop_assert!(is_mine(pos), "{pos} is not a mine");
            }
            for &pos in report.safes() {
                prop_assert!(!is_mine(pos), "{pos} is a mine");
            }

            let deterministic = NeighborCount::new().find_moves(&board);
            for &pos in deterministic.flags() {
                prop_assert!(is_mine(pos));
                prop_assert!(report.mines().contains(&pos), "{pos} missed by csp");
            }
        }
    }
}
