use std::{collections::BTreeSet, time::Instant};

use sweepwise_core::Position;

use super::CspConfig;
use crate::{CellValue, Component};

/// How often, in visited nodes, the search looks at the clock.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// The variables of a component that hold the same value in every solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certainties {
    mines: BTreeSet<Position>,
    safes: BTreeSet<Position>,
    solutions: usize,
}

impl Certainties {
    /// Returns the variables that are a mine in every solution.
    #[must_use]
    pub fn mines(&self) -> &BTreeSet<Position> {
        &self.mines
    }

    /// Returns the variables that are safe in every solution.
    #[must_use]
    pub fn safes(&self) -> &BTreeSet<Position> {
        &self.safes
    }

    /// Returns the number of solutions enumerated.
    #[must_use]
    pub fn solutions(&self) -> usize {
        self.solutions
    }

    /// Returns `true` if no variable is certain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safes.is_empty()
    }
}

/// The result of searching one component.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ComponentOutcome {
    /// Every solution was enumerated.
    Solved(Certainties),
    /// No assignment satisfies the constraints.
    Unsatisfiable,
    /// The component has more variables than the configured ceiling.
    TooLarge {
        /// Number of variables in the component.
        variables: usize,
    },
    /// More solutions exist than the configured cap.
    CapExceeded {
        /// The solution cap that was exceeded.
        cap: usize,
    },
    /// The batch deadline passed before the search finished.
    TimedOut,
}

impl ComponentOutcome {
    /// Returns the certainties if the component was fully solved.
    #[must_use]
    pub fn certainties(&self) -> Option<&Certainties> {
        match self {
            Self::Solved(certainties) => Some(certainties),
            _ => None,
        }
    }
}

/// A search state. Children copy it and extend it by one variable.
#[derive(Debug, Clone)]
struct Branch {
    depth: usize,
    mines: Vec<i32>,
    unassigned: Vec<i32>,
    values: Vec<CellValue>,
}

impl Branch {
    /// Assigns the next variable, or returns `None` if a constraint breaks.
    fn extend(&self, value: CellValue, touching: &[usize], required: &[i32]) -> Option<Self> {
        let mut child = self.clone();
        child.depth += 1;
        child.values.push(value);
        for &ci in touching {
            child.unassigned[ci] -= 1;
            if value.is_mine() {
                child.mines[ci] += 1;
            }
            if child.mines[ci] > required[ci]
                || child.mines[ci] + child.unassigned[ci] < required[ci]
            {
                return None;
            }
        }
        Some(child)
    }
}

/// Enumerates every solution of a component and reports the invariant variables.
///
/// Variables are assigned most-constrained first, trying `Mine` before `Safe`.
/// After each assignment every constraint on that variable is checked in both
/// directions; a violated branch is dropped without descending further.
///
/// The search stops early when the component is too large, when the solution
/// count exceeds the cap, or when `deadline` passes.
pub(super) fn solve_component(
    component: &Component,
    config: &CspConfig,
    deadline: Option<Instant>,
) -> ComponentOutcome {
    let order = component.search_order();
    let n = order.len();
    if n > config.max_variables {
        return ComponentOutcome::TooLarge { variables: n };
    }

    let constraints = component.constraints();
    if constraints.iter().any(|c| !c.is_satisfiable_in_isolation()) {
        return ComponentOutcome::Unsatisfiable;
    }

    let required: Vec<i32> = constraints.iter().map(|c| c.required()).collect();
    let mut touching: Vec<Vec<usize>> = vec![vec![]; n];
    let mut root = Branch {
        depth: 0,
        mines: vec![0; constraints.len()],
        unassigned: vec![0; constraints.len()],
        values: Vec::with_capacity(n),
    };
    for (ci, constraint) in constraints.iter().enumerate() {
        for pos in constraint.variables() {
            if let Some(vi) = order.iter().position(|p| p == pos) {
                touching[vi].push(ci);
                root.unassigned[ci] += 1;
            }
        }
    }

    let mut mine_counts = vec![0usize; n];
    let mut solutions = 0usize;
    let mut visited = 0u64;
    let mut stack = vec![root];

    while let Some(branch) = stack.pop() {
        visited += 1;
        if visited.is_multiple_of(DEADLINE_CHECK_INTERVAL)
            && deadline.is_some_and(|d| Instant::now() >= d)
        {
            return ComponentOutcome::TimedOut;
        }

        if branch.depth == n {
            solutions += 1;
            if solutions > config.solution_cap {
                return ComponentOutcome::CapExceeded {
                    cap: config.solution_cap,
                };
            }
            for (count, value) in mine_counts.iter_mut().zip(&branch.values) {
                if value.is_mine() {
                    *count += 1;
                }
            }
            continue;
        }

        let var = branch.depth;
        // Pushed in reverse so `Mine` is explored first.
        for value in [CellValue::Safe, CellValue::Mine] {
            if let Some(child) = branch.extend(value, &touching[var], &required) {
                stack.push(child);
            }
        }
    }

    if solutions == 0 {
        return ComponentOutcome::Unsatisfiable;
    }

    let mut certainties = Certainties {
        solutions,
        ..Certainties::default()
    };
    for (&pos, &count) in order.iter().zip(&mine_counts) {
        if count == solutions {
            certainties.mines.insert(pos);
        } else if count == 0 {
            certainties.safes.insert(pos);
        }
    }
    ComponentOutcome::Solved(certainties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constraint, ConstraintSet, decompose};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn solve(constraints: Vec<Constraint>) -> ComponentOutcome {
        solve_component(
            &Component::new(constraints),
            &CspConfig::default(),
            None,
        )
    }

    #[test]
    fn test_overlapping_pairs_have_no_certainties() {
        let outcome = solve(vec![
            Constraint::new([p(0, 0), p(0, 1)], 1),
            Constraint::new([p(0, 1), p(0, 2)], 1),
        ]);
        let certainties = outcome.certainties().unwrap();
        assert!(certainties.is_empty());
        assert_eq!(certainties.solutions(), 2);
    }

    #[test]
    fn test_forced_values_are_certain() {
        let outcome = solve(vec![
            Constraint::new([p(0, 0), p(0, 1), p(0, 2)], 1),
            Constraint::new([p(0, 1), p(0, 2)], 1),
        ]);
        let certainties = outcome.certainties().unwrap();
        assert_eq!(certainties.safes(), &BTreeSet::from([p(0, 0)]));
        assert!(certainties.mines().is_empty());
    }

    #[test]
    fn test_contradiction_is_unsatisfiable() {
        let outcome = solve(vec![
            Constraint::new([p(0, 0)], 1),
            Constraint::new([p(0, 0), p(0, 1)], 0),
        ]);
        assert!(outcome.is_unsatisfiable());
    }

    #[test]
    fn test_out_of_range_requirement_is_unsatisfiable() {
        assert!(solve(vec![Constraint::new([p(0, 0)], 2)]).is_unsatisfiable());
        assert!(solve(vec![Constraint::new([p(0, 0)], -1)]).is_unsatisfiable());
    }

    #[test]
    fn test_too_large_components_are_skipped() {
        let config = CspConfig {
            max_variables: 3,
            ..CspConfig::default()
        };
        let component = Component::new(vec![Constraint::new((0..4).map(|c| p(0, c)), 2)]);
        assert_eq!(
            solve_component(&component, &config, None),
            ComponentOutcome::TooLarge { variables: 4 }
        );
    }

    #[test]
    fn test_solution_cap_makes_result_inconclusive() {
        // C(6, 3) = 20 solutions.
        let component = Component::new(vec![Constraint::new((0..6).map(|c| p(0, c)), 3)]);
        let capped = CspConfig {
            solution_cap: 19,
            ..CspConfig::default()
        };
        assert_eq!(
            solve_component(&component, &capped, None),
            ComponentOutcome::CapExceeded { cap: 19 }
        );

        let exact = CspConfig {
            solution_cap: 20,
            ..CspConfig::default()
        };
        let outcome = solve_component(&component, &exact, None);
        assert_eq!(outcome.certainties().unwrap().solutions(), 20);
    }

    #[test]
    fn test_expired_deadline_times_out() {
        // Wide enough that the search visits more than one check interval.
        let component = Component::new(vec![Constraint::new((0..20).map(|c| p(0, c)), 10)]);
        let config = CspConfig {
            solution_cap: usize::MAX,
            ..CspConfig::default()
        };
        let outcome = solve_component(&component, &config, Some(Instant::now()));
        assert!(outcome.is_timed_out());
    }

    #[test]
    fn test_certainties_are_disjoint_and_contained() {
        let board: sweepwise_core::Board = "
            ____
            _21_
            _1._
            ____
        "
        .parse()
        .unwrap();
        for component in decompose(&ConstraintSet::from_board(&board)) {
            let outcome = solve_component(&component, &CspConfig::default(), None);
            let Some(certainties) = outcome.certainties() else {
                continue;
            };
            assert!(certainties.mines().is_disjoint(certainties.safes()));
            for pos in certainties.mines().iter().chain(certainties.safes()) {
                assert!(component.variables().contains(pos));
            }
        }
    }
}
