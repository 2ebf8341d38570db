//! The read, decide and act loop.

use std::{thread, time::Duration};

use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64;
use sweepwise_core::{Dimensions, Position};
use sweepwise_solver::{Decision, Engine, EngineConfig, Moves, Session};

use crate::{Actuator, BoardSource, BotError, StopHandle};

/// Bot settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Settings of the decision engine.
    pub engine: EngineConfig,
    /// Radius around the board center in which the opening click lands.
    ///
    /// `None` skips the opening click.
    pub opening_radius: Option<usize>,
    /// How many times the opening cell is clicked.
    pub opening_clicks: usize,
    /// Stop after this many cycles.
    pub max_cycles: Option<usize>,
    /// Pause after each cycle's actions, giving the game time to redraw.
    pub cycle_delay: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            opening_radius: Some(3),
            opening_clicks: 2,
            max_cycles: None,
            cycle_delay: Duration::ZERO,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RunOutcome {
    /// No covered cells remained.
    #[display("solved")]
    Solved,
    /// Covered cells remained but no move could be made.
    #[display("stuck")]
    Stuck,
    /// The stop handle was triggered.
    #[display("stopped")]
    Stopped,
    /// The board source ran out of boards.
    #[display("source exhausted")]
    SourceExhausted,
    /// The configured cycle limit was reached.
    #[display("cycle limit reached")]
    CycleLimit,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Cell clicked before the first cycle, if any.
    pub opening: Option<Position>,
    /// Decision cycles run.
    pub cycles: usize,
    /// Flags and reveals dispatched, the opening click excluded.
    pub moves: usize,
    /// Why the run ended.
    pub outcome: RunOutcome,
}

/// Drives an [`Engine`] with boards from a [`BoardSource`] and sends its
/// moves to an [`Actuator`].
///
/// # Examples
///
/// ```
/// use sweepwise_bot::{Action, Bot, BotConfig, RecordingActuator, RunOutcome, ScriptedSource};
/// use sweepwise_core::{Board, Position};
///
/// let board: Board = "
///     1_
///     11
/// "
/// .parse()?;
/// let solved: Board = "
///     1F
///     11
/// "
/// .parse()?;
///
/// let config = BotConfig { opening_radius: None, ..BotConfig::default() };
/// let mut bot = Bot::new(
///     board.dims(),
///     config,
///     ScriptedSource::new([board, solved]),
///     RecordingActuator::new(),
/// )?;
/// let report = bot.run()?;
///
/// assert_eq!(report.outcome, RunOutcome::Solved);
/// assert_eq!(bot.actuator().actions(), &[Action::Flag(Position::new(0, 1))]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Bot<S, A> {
    engine: Engine,
    source: S,
    actuator: A,
    config: BotConfig,
    stop: StopHandle,
    rng: Pcg64,
}

impl<S, A> Bot<S, A>
where
    S: BoardSource,
    A: Actuator,
{
    /// Creates a bot for boards of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Solver`] if the engine's worker pool cannot be
    /// built.
    pub fn new(
        dims: Dimensions,
        config: BotConfig,
        source: S,
        actuator: A,
    ) -> Result<Self, BotError> {
        let engine = Engine::new(dims, config.engine.clone())?;
        let rng = opening_rng(config.engine.seed);
        Ok(Self {
            engine,
            source,
            actuator,
            config,
            stop: StopHandle::new(),
            rng,
        })
    }

    /// Returns a handle that stops the run before its next cycle.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns the engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the actuator.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Returns the board source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs cycles until the board is solved or stuck, the stop handle is
    /// triggered, the source runs dry or the cycle limit is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or yields a board of the wrong
    /// size.
    pub fn run(&mut self) -> Result<RunReport, BotError> {
        let mut session = Session::new();
        let opening = if self.stop.is_stopped() {
            None
        } else {
            self.open()
        };

        let outcome = loop {
            if self.stop.is_stopped() {
                session.stop();
                break RunOutcome::Stopped;
            }
            if self
                .config
                .max_cycles
                .is_some_and(|max| session.cycles() >= max)
            {
                break RunOutcome::CycleLimit;
            }
            let Some(board) = self.source.next_board()? else {
                break RunOutcome::SourceExhausted;
            };
            match self.engine.decide(&board, &mut session)? {
                Decision::Act { moves, .. } => self.dispatch(&moves),
                Decision::Solved => break RunOutcome::Solved,
                Decision::Stuck => break RunOutcome::Stuck,
            }
            if !self.config.cycle_delay.is_zero() {
                thread::sleep(self.config.cycle_delay);
            }
        };

        log::info!(
            "run ended after {} cycles and {} moves: {outcome}",
            session.cycles(),
            session.moves()
        );
        Ok(RunReport {
            opening,
            cycles: session.cycles(),
            moves: session.moves(),
            outcome,
        })
    }

    fn open(&mut self) -> Option<Position> {
        let radius = self.config.opening_radius?;
        let candidates = opening_candidates(self.engine.dims(), radius);
        let &pos = candidates.choose(&mut self.rng)?;
        log::debug!("opening at {pos}");
        for _ in 0..self.config.opening_clicks {
            self.actuator.reveal(pos);
        }
        Some(pos)
    }

    fn dispatch(&mut self, moves: &Moves) {
        for &pos in moves.flags() {
            self.actuator.flag(pos);
        }
        for &pos in moves.reveals() {
            self.actuator.reveal(pos);
        }
    }
}

/// Seeds the opening pick on a stream apart from the engine's guesses.
fn opening_rng(seed: Option<u64>) -> Pcg64 {
    Pcg64::seed_from_u64(seed.map_or_else(rand::random, |seed| seed ^ OPENING_SEED_MASK))
}

const OPENING_SEED_MASK: u64 = 0x6f70_656e_696e_6721;

/// Returns the cells within `radius` rows and columns of the board center.
fn opening_candidates(dims: Dimensions, radius: usize) -> Vec<Position> {
    if dims.area() == 0 {
        return Vec::new();
    }
    let center = dims.center();
    let rows = center.row().saturating_sub(radius)..=(center.row() + radius).min(dims.rows - 1);
    let cols = center.col().saturating_sub(radius)..=(center.col() + radius).min(dims.cols - 1);
    rows.flat_map(|row| cols.clone().map(move |col| Position::new(row, col)))
        .collect()
}
