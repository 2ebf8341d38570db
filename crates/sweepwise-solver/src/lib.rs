//! Inference engine for Minesweeper boards.
//!
//! Given a partially revealed [`Board`](sweepwise_core::Board), the engine
//! proves cells safe or mined with increasingly expensive techniques and,
//! when nothing can be proven, picks the cell least likely to hold a mine.
//!
//! # Tiers
//!
//! 1. [`NeighborCount`](technique::NeighborCount): flag-complete and
//!    open-complete neighbor counting
//! 2. [`SubsetPattern`](technique::SubsetPattern): subset differences between
//!    adjacent numbers
//! 3. [`ConstraintSearch`](technique::ConstraintSearch): exhaustive
//!    backtracking per connected [`Component`]
//! 4. [`ProbabilityEstimator`]: averaged local mine likelihood
//!
//! [`Engine`] runs the tiers in that order once per cycle.
//!
//! # Examples
//!
//! ```
//! use sweepwise_core::{Board, Position};
//! use sweepwise_solver::{Decision, Engine, EngineConfig, Session, Tier};
//!
//! let board: Board = "
//!     1__
//!     11_
//!     ___
//! "
//! .parse()?;
//!
//! let mut engine = Engine::new(board.dims(), EngineConfig::default())?;
//! let mut session = Session::new();
//! let decision = engine.decide(&board, &mut session)?;
//!
//! let Decision::Act { tier, moves } = decision else {
//!     panic!("expected a move");
//! };
//! assert_eq!(tier, Tier::Deterministic);
//! assert!(moves.flags().contains(&Position::new(0, 1)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    component::{Component, decompose},
    constraint::{Assignment, CellValue, Constraint, ConstraintSet},
    csp::{Certainties, ComponentOutcome, CspConfig, CspReport, CspSolver},
    engine::{Decision, Engine, EngineConfig, EngineStats, RunState, Session, Tier},
    error::SolverError,
    moves::Moves,
    probability::{Guess, GuessBasis, ProbabilityEstimator},
};

mod component;
mod constraint;
pub mod csp;
mod engine;
mod error;
mod moves;
mod probability;
pub mod technique;

#[cfg(test)]
mod testing;
