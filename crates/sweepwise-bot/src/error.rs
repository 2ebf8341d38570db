use sweepwise_core::BoardError;
use sweepwise_solver::SolverError;
use sweepwise_vision::VisionError;

/// Errors that end a bot run.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant)]
pub enum BotError {
    /// The engine rejected a board or could not start.
    #[display("solver error: {_0}")]
    Solver(SolverError),
    /// A board could not be built.
    #[display("board error: {_0}")]
    Board(BoardError),
    /// A board could not be read from a capture.
    #[display("vision error: {_0}")]
    Vision(VisionError),
}
