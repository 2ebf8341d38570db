//! Dispatching decided moves to the game.

use sweepwise_core::Position;

/// Turns decided moves into input events.
///
/// Both operations are fire and forget: the bot never assumes the board
/// reflects an action before the next read.
pub trait Actuator {
    /// Reveals a cell (a primary click).
    fn reveal(&mut self, pos: Position);

    /// Flags a cell (a secondary click).
    fn flag(&mut self, pos: Position);
}

impl<A> Actuator for &mut A
where
    A: Actuator + ?Sized,
{
    fn reveal(&mut self, pos: Position) {
        (**self).reveal(pos);
    }

    fn flag(&mut self, pos: Position) {
        (**self).flag(pos);
    }
}

/// One dispatched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Action {
    /// A reveal of the cell.
    #[display("reveal {_0}")]
    Reveal(Position),
    /// A flag on the cell.
    #[display("flag {_0}")]
    Flag(Position),
}

impl Action {
    /// Returns the targeted cell.
    #[must_use]
    pub fn pos(self) -> Position {
        match self {
            Action::Reveal(pos) | Action::Flag(pos) => pos,
        }
    }
}

/// Keeps every action in dispatch order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingActuator {
    actions: Vec<Action>,
}

impl RecordingActuator {
    /// Creates an actuator with no recorded actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded actions.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Takes the recorded actions, leaving the record empty.
    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl Actuator for RecordingActuator {
    fn reveal(&mut self, pos: Position) {
        self.actions.push(Action::Reveal(pos));
    }

    fn flag(&mut self, pos: Position) {
        self.actions.push(Action::Flag(pos));
    }
}

/// Logs actions without performing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogActuator;

impl Actuator for LogActuator {
    fn reveal(&mut self, pos: Position) {
        log::info!("{}", Action::Reveal(pos));
    }

    fn flag(&mut self, pos: Position) {
        log::info!("{}", Action::Flag(pos));
    }
}
