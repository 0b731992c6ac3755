//! Per-variable constraint storage and variable-ordering heuristic.

use super::constraint::Constraint;
use std::collections::HashMap;

/// Maps each variable name to its registered constraint list.
///
/// The store is read-only during search. Registration order is remembered
/// so that diagnostics and validation iterate deterministically.
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    constraints: HashMap<String, Vec<Constraint>>,
    order: Vec<String>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the constraint list for `name`, overwriting any earlier list.
    ///
    /// Re-registering keeps the variable's original registration position.
    pub fn register(&mut self, name: impl Into<String>, constraints: Vec<Constraint>) {
        let name = name.into();
        if !self.constraints.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.constraints.insert(name, constraints);
    }

    /// Constraints registered for `name`; empty if none were registered.
    pub fn constraints(&self, name: &str) -> &[Constraint] {
        self.constraints.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterates `(name, constraints)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Constraint])> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.constraints(name)))
    }

    /// Total number of registered constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.values().map(Vec::len).sum()
    }

    /// Selects the unassigned variable with the longest constraint list.
    ///
    /// This is a degree-style heuristic: it counts constraint *declarations*,
    /// not remaining domain values or live conflicts. Ties go to the name
    /// encountered first, so callers must pass `unassigned` in a fixed order
    /// (the solver uses variable registration order).
    ///
    /// Returns `None` only when `unassigned` is empty.
    pub fn most_constrained_unassigned<'a, I>(&self, unassigned: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, usize)> = None;
        for name in unassigned {
            let count = self.constraints(name).len();
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((name, count)),
            }
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConstraintStore {
        let mut store = ConstraintStore::new();
        store.register("E1", vec![Constraint::SameValue, Constraint::hall(["A"])]);
        store.register("E2", vec![Constraint::SameValue]);
        store.register(
            "E3",
            vec![
                Constraint::SameValue,
                Constraint::after(["E1"]),
                Constraint::hall(["A"]),
            ],
        );
        store.register("E4", vec![Constraint::SameValue, Constraint::before(["E3"])]);
        store
    }

    #[test]
    fn test_most_constrained() {
        let store = store();
        let chosen = store.most_constrained_unassigned(["E1", "E2", "E3", "E4"]);
        assert_eq!(chosen, Some("E3"));
    }

    #[test]
    fn test_tie_break_first_encountered() {
        let store = store();
        assert_eq!(store.most_constrained_unassigned(["E1", "E4"]), Some("E1"));
        assert_eq!(store.most_constrained_unassigned(["E4", "E1"]), Some("E4"));
    }

    #[test]
    fn test_unregistered_counts_as_zero() {
        let store = store();
        assert_eq!(store.most_constrained_unassigned(["X", "E2"]), Some("E2"));
        assert_eq!(store.most_constrained_unassigned(["X"]), Some("X"));
        assert!(store.constraints("X").is_empty());
    }

    #[test]
    fn test_empty_unassigned() {
        let store = store();
        assert_eq!(store.most_constrained_unassigned(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut store = store();
        store.register("E1", vec![]);
        assert!(store.constraints("E1").is_empty());
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["E1", "E2", "E3", "E4"]);
        assert_eq!(store.constraint_count(), 1 + 3 + 2);
    }
}
