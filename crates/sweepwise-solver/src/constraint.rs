use std::collections::{BTreeMap, HashSet};

use sweepwise_core::{Board, Position};

/// The value a variable takes in an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellValue {
    /// The cell holds a mine.
    Mine,
    /// The cell is mine-free.
    Safe,
}

/// An assertion that exactly `required` of `variables` are mines.
///
/// Variables are kept sorted and free of duplicates, so two constraints over
/// the same cells compare equal regardless of how they were built.
///
/// `required` is signed: a number with more flags around it than its value
/// yields a negative count, which no assignment can satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    variables: Vec<Position>,
    required: i32,
}

impl Constraint {
    /// Creates a constraint over the given cells.
    #[must_use]
    pub fn new(variables: impl IntoIterator<Item = Position>, required: i32) -> Self {
        let mut variables: Vec<_> = variables.into_iter().collect();
        variables.sort_unstable();
        variables.dedup();
        Self {
            variables,
            required,
        }
    }

    /// Returns the constrained cells in row-major order.
    #[must_use]
    pub fn variables(&self) -> &[Position] {
        &self.variables
    }

    /// Returns the number of mines required among the variables.
    #[must_use]
    pub fn required(&self) -> i32 {
        self.required
    }

    /// Returns `true` if `required` lies in `0..=variables.len()`.
    #[must_use]
    pub fn is_satisfiable_in_isolation(&self) -> bool {
        i32::try_from(self.variables.len()).is_ok_and(|len| (0..=len).contains(&self.required))
    }

    /// Returns `true` if no completion of `assignment` can satisfy this constraint.
    ///
    /// The constraint is violated when its assigned mines already exceed the
    /// required count, or when marking every unassigned variable as a mine
    /// still falls short of it.
    #[must_use]
    pub fn is_violated_by(&self, assignment: &Assignment) -> bool {
        let mut mines = 0;
        let mut unassigned = 0;
        for &pos in &self.variables {
            match assignment.get(pos) {
                Some(CellValue::Mine) => mines += 1,
                Some(CellValue::Safe) => {}
                None => unassigned += 1,
            }
        }
        mines > self.required || mines + unassigned < self.required
    }
}

/// A partial mapping from variables to values.
///
/// Extending an assignment returns a new one and leaves the original intact,
/// so search branches never share mutable state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Position, CellValue>,
}

impl Assignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this assignment with `pos` set to `value`.
    #[must_use]
    pub fn with(&self, pos: Position, value: CellValue) -> Self {
        let mut values = self.values.clone();
        values.insert(pos, value);
        Self { values }
    }

    /// Returns the value assigned to `pos`, if any.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<CellValue> {
        self.values.get(&pos).copied()
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the assigned variables and their values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellValue)> + '_ {
        self.values.iter().map(|(&pos, &value)| (pos, value))
    }
}

impl FromIterator<(Position, CellValue)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Position, CellValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// The deduplicated constraints of one board, with per-variable reference counts.
///
/// # Examples
///
/// ```
/// use sweepwise_core::{Board, Position};
/// use sweepwise_solver::ConstraintSet;
///
/// let board: Board = "
///     ___
///     .1.
/// "
/// .parse()?;
///
/// let set = ConstraintSet::from_board(&board);
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.constraints()[0].required(), 1);
/// assert_eq!(set.frequency(Position::new(0, 1)), 1);
/// # Ok::<(), sweepwise_core::BoardError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    frequency: BTreeMap<Position, usize>,
}

impl ConstraintSet {
    /// Builds one constraint per numbered tile that has covered neighbors.
    ///
    /// The required count is the number minus the flagged neighbors.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self::from_constraints(board.numbered().filter_map(|(pos, _)| {
            let covered = board.covered_neighbors(pos);
            if covered.is_empty() {
                return None;
            }
            let required = board.remaining_mines(pos)?;
            Some(Constraint::new(covered, required))
        }))
    }

    /// Collects constraints, dropping exact duplicates.
    ///
    /// The first occurrence of each distinct constraint keeps its position.
    #[must_use]
    pub fn from_constraints(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let mut seen = HashSet::new();
        let mut set = Self::default();
        for constraint in constraints {
            if !seen.insert(constraint.clone()) {
                continue;
            }
            for &pos in constraint.variables() {
                *set.frequency.entry(pos).or_default() += 1;
            }
            set.constraints.push(constraint);
        }
        set
    }

    /// Returns the constraints in build order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns how many constraints reference `pos`.
    #[must_use]
    pub fn frequency(&self, pos: Position) -> usize {
        self.frequency.get(&pos).copied().unwrap_or(0)
    }

    /// Returns every variable in row-major order.
    pub fn variables(&self) -> impl Iterator<Item = Position> + '_ {
        self.frequency.keys().copied()
    }

    /// Returns the number of distinct constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the board produced no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_variables_are_sorted_and_unique() {
        let c = Constraint::new([p(1, 1), p(0, 2), p(1, 1), p(0, 0)], 1);
        assert_eq!(c.variables(), &[p(0, 0), p(0, 2), p(1, 1)]);
        assert_eq!(c, Constraint::new([p(0, 2), p(1, 1), p(0, 0)], 1));
    }

    #[test]
    fn test_satisfiable_in_isolation() {
        assert!(Constraint::new([p(0, 0), p(0, 1)], 0).is_satisfiable_in_isolation());
        assert!(Constraint::new([p(0, 0), p(0, 1)], 2).is_satisfiable_in_isolation());
        assert!(!Constraint::new([p(0, 0), p(0, 1)], 3).is_satisfiable_in_isolation());
        assert!(!Constraint::new([p(0, 0)], -1).is_satisfiable_in_isolation());
    }

    #[test]
    fn test_violation_is_two_sided() {
        let c = Constraint::new([p(0, 0), p(0, 1), p(0, 2)], 1);
        let empty = Assignment::new();
        assert!(!c.is_violated_by(&empty));

        let two_mines = empty
            .with(p(0, 0), CellValue::Mine)
            .with(p(0, 1), CellValue::Mine);
        assert!(c.is_violated_by(&two_mines));

        let all_safe = empty
            .with(p(0, 0), CellValue::Safe)
            .with(p(0, 1), CellValue::Safe)
            .with(p(0, 2), CellValue::Safe);
        assert!(c.is_violated_by(&all_safe));

        let one_mine = empty
            .with(p(0, 0), CellValue::Safe)
            .with(p(0, 1), CellValue::Mine);
        assert!(!c.is_violated_by(&one_mine));
    }

    #[test]
    fn test_negative_requirement_is_always_violated() {
        let c = Constraint::new([p(0, 0)], -1);
        assert!(c.is_violated_by(&Assignment::new()));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = Assignment::new().with(p(0, 0), CellValue::Mine);
        let branch = base.with(p(0, 1), CellValue::Safe);
        assert_eq!(base.len(), 1);
        assert_eq!(branch.len(), 2);
        assert_eq!(base.get(p(0, 1)), None);
        assert_eq!(branch.get(p(0, 1)), Some(CellValue::Safe));
    }

    #[test]
    fn test_from_board_skips_tiles_without_covered_neighbors() {
        let board: Board = "1F\n..".parse().unwrap();
        assert!(ConstraintSet::from_board(&board).is_empty());
    }

    #[test]
    fn test_from_board_subtracts_flags() {
        let board: Board = "F_\n2_".parse().unwrap();
        let set = ConstraintSet::from_board(&board);
        assert_eq!(set.constraints(), &[Constraint::new([p(0, 1), p(1, 1)], 1)]);
    }

    #[test]
    fn test_exact_duplicates_are_merged() {
        // Both 1s see exactly the same two covered cells.
        let board: Board = "__\n11".parse().unwrap();
        let set = ConstraintSet::from_board(&board);
        assert_eq!(set.len(), 1);
        assert_eq!(set.frequency(p(0, 0)), 1);
        assert_eq!(set.frequency(p(0, 1)), 1);
    }

    #[test]
    fn test_same_variables_with_different_counts_are_kept() {
        let set = ConstraintSet::from_constraints([
            Constraint::new([p(0, 0), p(0, 1)], 1),
            Constraint::new([p(0, 0), p(0, 1)], 2),
            Constraint::new([p(0, 1), p(0, 0)], 1),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.frequency(p(0, 0)), 2);
        assert_eq!(set.variables().collect::<Vec<_>>(), vec![p(0, 0), p(0, 1)]);
    }

    fn value_strategy() -> impl Strategy<Value = CellValue> {
        prop_oneof![Just(CellValue::Mine), Just(CellValue::Safe)]
    }

    proptest! {
        #[test]
        fn test_extension_never_restores_consistency(
            size in 1usize..=8,
            required in -1i32..=9,
            values in prop::collection::vec(value_strategy(), 8),
            split in 0usize..=8,
        ) {
            let vars: Vec<_> = (0..size).map(|i| p(0, i)).collect();
            let constraint = Constraint::new(vars.iter().copied(), required);

            let split = split.min(size);
            let partial: Assignment = vars[..split].iter().copied().zip(values.iter().copied()).collect();
            let mut extended = partial.clone();
            for (&pos, &value) in vars[split..].iter().zip(&values[split..]) {
                extended = extended.with(pos, value);
                if constraint.is_violated_by(&partial) {
                    prop_assert!(constraint.is_violated_by(&extended));
                }
            }
        }
    }
}
