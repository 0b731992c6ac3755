//! Constraint kinds.

use super::domain::Room;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A constraint owned by a single variable.
///
/// Constraints restrict the variable they are registered for. Binary kinds
/// (`Before`, `After`) name their targets but are not duplicated on the
/// target side.
///
/// # Examples
///
/// ```
/// use u_csp::csp::Constraint;
///
/// let constraints = vec![
///     Constraint::SameValue,
///     Constraint::before(["E3"]),
///     Constraint::hall(["A", "C"]),
/// ];
/// assert_eq!(constraints[1].targets().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constraint {
    /// Mutual exclusion: no other assigned variable may hold an identical
    /// `(time slot, room)` value.
    SameValue,

    /// The owner's time slot is strictly earlier than each target's slot.
    Before(BTreeSet<String>),

    /// The owner's time slot is strictly later than each target's slot.
    After(BTreeSet<String>),

    /// The owner's room is one of the allowed rooms.
    Hall(BTreeSet<Room>),
}

impl Constraint {
    /// Convenience: a `Before` constraint over the given variable names.
    pub fn before<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::Before(targets.into_iter().map(Into::into).collect())
    }

    /// Convenience: an `After` constraint over the given variable names.
    pub fn after<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::After(targets.into_iter().map(Into::into).collect())
    }

    /// Convenience: a `Hall` constraint over the given room labels.
    pub fn hall<I, R>(rooms: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Room>,
    {
        Constraint::Hall(rooms.into_iter().map(Into::into).collect())
    }

    /// Variable names referenced by the constraint (empty for unary kinds).
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let targets = match self {
            Constraint::Before(targets) | Constraint::After(targets) => Some(targets),
            Constraint::SameValue | Constraint::Hall(_) => None,
        };
        targets.into_iter().flatten().map(String::as_str)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_constraints_from_json() {
        let json = r#"["SameValue", {"Before": ["E3"]}, {"Hall": ["A", "C"]}]"#;
        let constraints: Vec<Constraint> = serde_json::from_str(json).unwrap();
        assert_eq!(
            constraints,
            vec![
                Constraint::SameValue,
                Constraint::before(["E3"]),
                Constraint::hall(["A", "C"]),
            ]
        );
    }

    #[test]
    fn test_constraint_json_shape() {
        let json = serde_json::to_string(&Constraint::after(["E4", "E9"])).unwrap();
        assert_eq!(json, r#"{"After":["E4","E9"]}"#);
    }
}
