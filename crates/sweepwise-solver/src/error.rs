use sweepwise_core::BoardError;

/// Errors surfaced by the engine.
///
/// Contradictory reads, oversized components and timeouts are not errors; they
/// only reduce the deductions of a cycle.
#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum SolverError {
    /// The caller supplied a malformed grid.
    #[display("invalid board: {_0}")]
    Board(#[from] BoardError),
    /// The CSP worker pool could not be created.
    #[display("failed to build CSP worker pool: {_0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use sweepwise_core::Dimensions;

    use super::*;

    #[test]
    fn test_board_errors_convert() {
        let err = SolverError::from(BoardError::DimensionMismatch {
            expected: Dimensions::new(2, 2),
            actual: Dimensions::new(3, 3),
        });
        assert!(err.is_board());
        assert!(!err.is_worker_pool());
        assert!(err.to_string().starts_with("invalid board: "));
    }
}
