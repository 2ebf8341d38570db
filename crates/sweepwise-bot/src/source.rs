//! Where each cycle's board comes from.

use std::collections::VecDeque;

use sweepwise_core::Board;
use sweepwise_vision::{FrameGrabber, Perception};

use crate::BotError;

/// Produces the board at the start of every cycle.
pub trait BoardSource {
    /// Reads the current board.
    ///
    /// Returns `Ok(None)` once the source has no more boards.
    ///
    /// # Errors
    ///
    /// Returns an error if the board could not be read.
    fn next_board(&mut self) -> Result<Option<Board>, BotError>;
}

/// Replays a fixed sequence of boards.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    boards: VecDeque<Board>,
}

impl ScriptedSource {
    /// Creates a source that yields `boards` in order.
    #[must_use]
    pub fn new(boards: impl IntoIterator<Item = Board>) -> Self {
        Self {
            boards: boards.into_iter().collect(),
        }
    }

    /// Queues another board.
    pub fn push(&mut self, board: Board) {
        self.boards.push_back(board);
    }

    /// Returns the number of boards not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.boards.len()
    }
}

impl BoardSource for ScriptedSource {
    fn next_board(&mut self) -> Result<Option<Board>, BotError> {
        Ok(self.boards.pop_front())
    }
}

/// Reads boards from live captures.
#[derive(Debug)]
pub struct VisionSource<G> {
    grabber: G,
    perception: Perception,
}

impl<G> VisionSource<G>
where
    G: FrameGrabber,
{
    /// Creates a source reading frames from `grabber`.
    #[must_use]
    pub fn new(grabber: G, perception: Perception) -> Self {
        Self {
            grabber,
            perception,
        }
    }

    /// Returns the perception state, including its tile cache.
    #[must_use]
    pub fn perception(&self) -> &Perception {
        &self.perception
    }
}

impl<G> BoardSource for VisionSource<G>
where
    G: FrameGrabber,
{
    fn next_board(&mut self) -> Result<Option<Board>, BotError> {
        Ok(Some(self.perception.capture(&mut self.grabber)?))
    }
}
