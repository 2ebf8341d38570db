//! The play loop around the decision engine.
//!
//! A [`Bot`] reads a board from a [`BoardSource`] each cycle, asks the
//! [`Engine`](sweepwise_solver::Engine) for a decision and hands the resulting
//! flags and reveals to an [`Actuator`]. The run ends when the board is solved
//! or stuck, when a [`StopHandle`] is triggered, when the source runs out of
//! boards or when the cycle limit is reached.
//!
//! Sources and actuators are traits so the loop runs the same against live
//! captures ([`VisionSource`]) and against recorded boards
//! ([`ScriptedSource`]).

pub use self::{
    actuator::{Action, Actuator, LogActuator, RecordingActuator},
    bot::{Bot, BotConfig, RunOutcome, RunReport},
    error::BotError,
    source::{BoardSource, ScriptedSource, VisionSource},
    stop::StopHandle,
};

mod actuator;
mod bot;
mod error;
mod source;
mod stop;
