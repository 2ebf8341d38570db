use std::collections::{BTreeMap, BTreeSet, VecDeque};

use sweepwise_core::Position;

use crate::{Constraint, ConstraintSet};

/// A maximal group of variables connected through shared constraints.
///
/// No variable belongs to two components, so components can be solved
/// independently and in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    variables: Vec<Position>,
    constraints: Vec<Constraint>,
    frequency: BTreeMap<Position, usize>,
}

impl Component {
    /// Creates a component from the constraints that make it up.
    ///
    /// The variables are the union of the constraints' variables, sorted.
    #[must_use]
    pub fn new(constraints: Vec<Constraint>) -> Self {
        let mut frequency: BTreeMap<Position, usize> = BTreeMap::new();
        for &pos in constraints.iter().flat_map(|c| c.variables()) {
            *frequency.entry(pos).or_default() += 1;
        }
        Self::with_frequency(constraints, frequency)
    }

    fn with_frequency(constraints: Vec<Constraint>, frequency: BTreeMap<Position, usize>) -> Self {
        let variables: BTreeSet<_> = constraints
            .iter()
            .flat_map(|c| c.variables().iter().copied())
            .collect();
        Self {
            variables: variables.into_iter().collect(),
            constraints,
            frequency,
        }
    }

    /// Returns the variables in row-major order.
    #[must_use]
    pub fn variables(&self) -> &[Position] {
        &self.variables
    }

    /// Returns the constraints touching this component.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns how many constraints reference `pos`.
    #[must_use]
    pub fn frequency(&self, pos: Position) -> usize {
        self.frequency.get(&pos).copied().unwrap_or(0)
    }

    /// Returns the variables in search order.
    ///
    /// Variables referenced by more constraints come first; equally
    /// constrained variables keep row-major order.
    #[must_use]
    pub fn search_order(&self) -> Vec<Position> {
        let mut order = self.variables.clone();
        order.sort_by_key(|&pos| std::cmp::Reverse(self.frequency(pos)));
        order
    }
}

/// Splits a constraint set into connected components.
///
/// Two variables are connected when they appear in the same constraint.
/// Components are discovered by breadth-first traversal starting from the
/// smallest unvisited variable, so the output order is deterministic. Each
/// component takes its variables' reference counts from `set`.
///
/// # Examples
///
/// ```
/// use sweepwise_core::Position;
/// use sweepwise_solver::{Constraint, ConstraintSet, decompose};
///
/// let p = Position::new;
/// let set = ConstraintSet::from_constraints([
///     Constraint::new([p(0, 0), p(0, 1)], 1),
///     Constraint::new([p(5, 5), p(5, 6)], 1),
///     Constraint::new([p(0, 1), p(0, 2)], 1),
/// ]);
///
/// let components = decompose(&set);
/// assert_eq!(components.len(), 2);
/// assert_eq!(components[0].variables(), &[p(0, 0), p(0, 1), p(0, 2)]);
/// assert_eq!(components[1].variables(), &[p(5, 5), p(5, 6)]);
/// ```
#[must_use]
pub fn decompose(set: &ConstraintSet) -> Vec<Component> {
    let constraints = set.constraints();

    let mut incidence: BTreeMap<Position, Vec<usize>> = BTreeMap::new();
    for (i, constraint) in constraints.iter().enumerate() {
        for &pos in constraint.variables() {
            incidence.entry(pos).or_default().push(i);
        }
    }

    let mut visited_vars = BTreeSet::new();
    let mut visited_constraints = vec![false; constraints.len()];
    let mut components = vec![];

    for &start in incidence.keys() {
        if !visited_vars.insert(start) {
            continue;
        }
        let mut members = vec![];
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for &ci in incidence.get(&pos).map_or(&[][..], Vec::as_slice) {
                if visited_constraints[ci] {
                    continue;
                }
                visited_constraints[ci] = true;
                members.push(ci);
                for &next in constraints[ci].variables() {
                    if visited_vars.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        members.sort_unstable();
        let members: Vec<_> = members.into_iter().map(|ci| constraints[ci].clone()).collect();
        let frequency = members
            .iter()
            .flat_map(|c| c.variables())
            .map(|&pos| (pos, set.frequency(pos)))
            .collect();
        components.push(Component::with_frequency(members, frequency));
    }

    components
}
