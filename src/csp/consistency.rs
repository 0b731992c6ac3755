//! Incremental and post-hoc consistency checking.

use super::config::OrderingCheck;
use super::constraint::Constraint;
use super::domain::{DomainValue, Room, TimeSlot};
use super::store::ConstraintStore;
use super::variables::{Assignment, Variable};
use thiserror::Error;

/// A violated constraint, attributed to the variable that owns it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("`{variable}` and `{other}` share {value}")]
    SameValue {
        variable: String,
        other: String,
        value: DomainValue,
    },
    #[error("`{variable}` at {time} is not before `{target}` at {target_time}")]
    Before {
        variable: String,
        time: TimeSlot,
        target: String,
        target_time: TimeSlot,
    },
    #[error("`{variable}` at {time} is not after `{target}` at {target_time}")]
    After {
        variable: String,
        time: TimeSlot,
        target: String,
        target_time: TimeSlot,
    },
    #[error("`{variable}` is placed in disallowed room {room}")]
    Hall { variable: String, room: Room },
}

impl Violation {
    /// Name of the variable owning the violated constraint.
    pub fn variable(&self) -> &str {
        match self {
            Violation::SameValue { variable, .. }
            | Violation::Before { variable, .. }
            | Violation::After { variable, .. }
            | Violation::Hall { variable, .. } => variable,
        }
    }
}

/// Evaluates candidate values against the current partial assignment.
///
/// The checker borrows the constraint store read-only and never mutates the
/// assignment; the returned [`Violation`] is its only output.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker<'a> {
    store: &'a ConstraintStore,
    ordering: OrderingCheck,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(store: &'a ConstraintStore, ordering: OrderingCheck) -> Self {
        Self { store, ordering }
    }

    /// Whether `candidate` is consistent with every assigned variable.
    pub fn is_consistent(&self, candidate: &Variable, assignment: &Assignment) -> bool {
        self.check(candidate, assignment).is_ok()
    }

    /// Checks `candidate` and returns the first violated constraint.
    ///
    /// Every constraint registered for the candidate is evaluated in
    /// registration order. `Before`/`After` targets that are not assigned
    /// yet are skipped. Under [`OrderingCheck::Bidirectional`] the
    /// constraints of assigned variables that relate to the candidate are
    /// evaluated afterwards. An unassigned candidate is trivially consistent.
    pub fn check(&self, candidate: &Variable, assignment: &Assignment) -> Result<(), Violation> {
        let Some(value) = candidate.value() else {
            return Ok(());
        };
        let name = candidate.name();

        for constraint in self.store.constraints(name) {
            if let Some(violation) = owned_violation(name, value, constraint, assignment) {
                return Err(violation);
            }
        }

        if self.ordering == OrderingCheck::Bidirectional {
            for (other, other_value) in assignment.iter() {
                if other == name {
                    continue;
                }
                for constraint in self.store.constraints(other) {
                    if let Some(violation) =
                        pair_violation(other, other_value, constraint, name, value)
                    {
                        return Err(violation);
                    }
                }
            }
        }

        Ok(())
    }

    /// Re-validates every registered constraint against `assignment`.
    ///
    /// Intended for complete assignments, where it is the authoritative
    /// correctness check regardless of the search-time policy. Targets
    /// missing from a partial assignment are skipped.
    pub fn verify(&self, assignment: &Assignment) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (name, value) in assignment.iter() {
            for constraint in self.store.constraints(name) {
                if let Some(violation) = unary_violation(name, value, constraint) {
                    violations.push(violation);
                    continue;
                }
                violations.extend(assignment.iter().filter_map(|(other, other_value)| {
                    pair_violation(name, value, constraint, other, other_value)
                }));
            }
        }
        violations
    }
}

/// First violation of `constraint`, owned by `name`, against the assignment.
fn owned_violation(
    name: &str,
    value: &DomainValue,
    constraint: &Constraint,
    assignment: &Assignment,
) -> Option<Violation> {
    match constraint {
        Constraint::Hall(_) => unary_violation(name, value, constraint),
        Constraint::SameValue => assignment.iter().find_map(|(other, other_value)| {
            pair_violation(name, value, constraint, other, other_value)
        }),
        Constraint::Before(targets) | Constraint::After(targets) => {
            targets.iter().find_map(|target| {
                let target_value = assignment.get(target)?;
                pair_violation(name, value, constraint, target, target_value)
            })
        }
    }
}

fn unary_violation(name: &str, value: &DomainValue, constraint: &Constraint) -> Option<Violation> {
    match constraint {
        Constraint::Hall(allowed) if !allowed.contains(&value.room) => Some(Violation::Hall {
            variable: name.to_string(),
            room: value.room.clone(),
        }),
        _ => None,
    }
}

/// Violation of `owner`'s `constraint` with respect to one other variable.
///
/// Returns `None` when the constraint does not relate the two variables.
fn pair_violation(
    owner: &str,
    owner_value: &DomainValue,
    constraint: &Constraint,
    other: &str,
    other_value: &DomainValue,
) -> Option<Violation> {
    if owner == other {
        return None;
    }
    match constraint {
        Constraint::SameValue if owner_value == other_value => Some(Violation::SameValue {
            variable: owner.to_string(),
            other: other.to_string(),
            value: owner_value.clone(),
        }),
        Constraint::Before(targets)
            if targets.contains(other) && owner_value.time >= other_value.time =>
        {
            Some(Violation::Before {
                variable: owner.to_string(),
                time: owner_value.time,
                target: other.to_string(),
                target_time: other_value.time,
            })
        }
        Constraint::After(targets)
            if targets.contains(other) && owner_value.time <= other_value.time =>
        {
            Some(Violation::After {
                variable: owner.to_string(),
                time: owner_value.time,
                target: other.to_string(),
                target_time: other_value.time,
            })
        }
        _ => None,
    }
}
