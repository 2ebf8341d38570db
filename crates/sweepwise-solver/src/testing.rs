//! Test utilities for technique implementations.
//!
//! [`TechniqueTester`] keeps the initial and current board of a test case,
//! applies techniques to it and offers fluent assertions about the result.

use sweepwise_core::{Board, Position, Tile};

use crate::{Moves, technique::Technique};

/// A test harness for verifying technique implementations.
///
/// All methods return `self`, so a test reads as one chain. Assertions use
/// `#[track_caller]` so failures point at the test, not the harness.
#[derive(Debug)]
pub struct TechniqueTester {
    initial: Board,
    current: Board,
    moves: Moves,
    check_find_moves_consistency: bool,
}

impl TechniqueTester {
    /// Creates a tester from an initial board.
    pub fn new(initial: Board) -> Self {
        Self {
            current: initial.clone(),
            initial,
            moves: Moves::new(),
            check_find_moves_consistency: true,
        }
    }

    /// Creates a tester from a board in text form.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid board.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::new(s.parse().unwrap())
    }

    /// Disables the `find_moves`/`apply` consistency check.
    #[must_use]
    pub fn without_find_moves_consistency(mut self) -> Self {
        self.check_find_moves_consistency = false;
        self
    }

    /// Applies the technique once.
    #[track_caller]
    pub fn apply_once<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        self.apply_step(technique);
        self
    }

    /// Applies the technique until it makes no more moves.
    #[track_caller]
    pub fn apply_until_stuck<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        while self.apply_step(technique) {}
        self
    }

    #[track_caller]
    fn apply_step<T>(&mut self, technique: &T) -> bool
    where
        T: Technique,
    {
        let expected = self
            .check_find_moves_consistency
            .then(|| technique.find_moves(&self.current));
        let applied = technique.apply(&mut self.current);
        if let Some(expected) = expected {
            assert_eq!(
                expected,
                applied,
                "Expected {} to find the same moves it applies",
                technique.name()
            );
        }
        let changed = !applied.is_empty();
        self.moves.extend(applied);
        changed
    }

    /// Asserts that a covered cell is now flagged.
    #[track_caller]
    pub fn assert_flagged(self, pos: Position) -> Self {
        self.assert_transition(pos, Tile::Flagged)
    }

    /// Asserts that a covered cell is now marked for reveal.
    #[track_caller]
    pub fn assert_pending(self, pos: Position) -> Self {
        self.assert_transition(pos, Tile::Pending)
    }

    #[track_caller]
    fn assert_transition(self, pos: Position, expected: Tile) -> Self {
        let initial = self.initial[pos];
        let current = self.current[pos];
        assert_eq!(
            initial,
            Tile::Covered,
            "Expected initial tile at {pos} to be covered, but was {initial:?}"
        );
        assert_eq!(
            current, expected,
            "Expected tile at {pos} to become {expected:?}, but is {current:?}"
        );
        self
    }

    /// Asserts that a tile has not changed.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        let initial = self.initial[pos];
        let current = self.current[pos];
        assert_eq!(
            initial, current,
            "Expected no change at {pos}, but tile changed from {initial:?} to {current:?}"
        );
        self
    }

    /// Asserts that exactly the given cells were flagged.
    #[track_caller]
    pub fn assert_flags_exact<I>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let expected: Vec<_> = expected.into_iter().collect();
        let actual: Vec<_> = self.moves.flags().iter().copied().collect();
        let mut sorted = expected.clone();
        sorted.sort_unstable();
        assert_eq!(
            actual, sorted,
            "Expected exactly {expected:?} to be flagged, but flagged {actual:?}"
        );
        self
    }

    /// Asserts that exactly the given cells were marked for reveal.
    #[track_caller]
    pub fn assert_reveals_exact<I>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let expected: Vec<_> = expected.into_iter().collect();
        let actual: Vec<_> = self.moves.reveals().iter().copied().collect();
        let mut sorted = expected.clone();
        sorted.sort_unstable();
        assert_eq!(
            actual, sorted,
            "Expected exactly {expected:?} to be revealed, but revealed {actual:?}"
        );
        self
    }

    /// Asserts that no move was made and the board is untouched.
    #[track_caller]
    pub fn assert_no_moves(self) -> Self {
        assert!(
            self.moves.is_empty(),
            "Expected no moves, but got {:?}",
            self.moves
        );
        assert_eq!(
            self.initial, self.current,
            "Expected board to be unchanged:\n{}\nbut got:\n{}",
            self.initial, self.current
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technique::BoxedTechnique;

    // Reveals the first covered cell it finds.
    #[derive(Debug)]
    struct RevealFirst;

    impl Technique for RevealFirst {
        fn name(&self) -> &'static str {
            "reveal first"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(RevealFirst)
        }

        fn apply(&self, board: &mut Board) -> Moves {
            let first = board.covered().next();
            match first {
                Some(pos) => Moves::reveal_one(pos).apply_to(board),
                None => Moves::new(),
            }
        }
    }

    // Reports a move it never makes.
    #[derive(Debug)]
    struct Liar;

    impl Technique for Liar {
        fn name(&self) -> &'static str {
            "liar"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(Liar)
        }

        fn apply(&self, _board: &mut Board) -> Moves {
            Moves::new()
        }

        fn find_moves(&self, _board: &Board) -> Moves {
            Moves::reveal_one(Position::new(0, 0))
        }
    }

    #[test]
    fn test_apply_once_records_moves() {
        TechniqueTester::from_str("__\n1.")
            .apply_once(&RevealFirst)
            .assert_pending(Position::new(0, 0))
            .assert_no_change(Position::new(0, 1))
            .assert_reveals_exact([Position::new(0, 0)])
            .assert_flags_exact([]);
    }

    #[test]
    fn test_apply_until_stuck_runs_to_completion() {
        TechniqueTester::from_str("__\n1.")
            .apply_until_stuck(&RevealFirst)
            .assert_reveals_exact([Position::new(0, 1), Position::new(0, 0)]);
    }

    #[test]
    #[should_panic(expected = "Expected liar to find the same moves it applies")]
    fn test_inconsistent_find_moves_panics() {
        let _ = TechniqueTester::from_str("_").apply_once(&Liar);
    }

    #[test]
    fn test_consistency_check_can_be_disabled() {
        TechniqueTester::from_str("_")
            .without_find_moves_consistency()
            .apply_once(&Liar)
            .assert_no_moves();
    }

    #[test]
    #[should_panic(expected = "Expected no moves")]
    fn test_assert_no_moves_fails_after_moves() {
        let _ = TechniqueTester::from_str("_")
            .apply_once(&RevealFirst)
            .assert_no_moves();
    }

    #[test]
    #[should_panic(expected = "to be covered")]
    fn test_assert_flagged_requires_covered_start() {
        let _ = TechniqueTester::from_str("F")
            .apply_once(&RevealFirst)
            .assert_flagged(Position::new(0, 0));
    }
}
