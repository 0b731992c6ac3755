//! Domain value types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A time slot on a totally ordered timeline (`t1 < t2 < ... < tN`).
///
/// Backed by an integer so that `Before`/`After` constraints compare slots
/// with the native ordering. The numbering is fixed when the domain is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot(u32);

impl TimeSlot {
    /// Creates the slot with the given position on the timeline.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position on the timeline.
    pub fn index(self) -> u32 {
        self.0
    }

    /// Yields `t1, t2, ..., t<count>` in ascending order.
    pub fn sequence(count: u32) -> impl Iterator<Item = TimeSlot> {
        (1..=count).map(TimeSlot)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// An opaque room label. Rooms are compared for equality only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room(String);

impl Room {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Room {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Room {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate value for a variable: a `(time slot, room)` pair.
///
/// Equality is structural: two values are equal only when both the slot
/// and the room match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainValue {
    /// Time slot of the value.
    pub time: TimeSlot,
    /// Room of the value.
    pub room: Room,
}

impl DomainValue {
    pub fn new(time: TimeSlot, room: impl Into<Room>) -> Self {
        Self {
            time,
            room: room.into(),
        }
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.room)
    }
}

/// The finite, ordered list of values every variable may take.
///
/// The solver tries values in exactly this order, so the order of
/// construction determines which solution is found first.
///
/// # Examples
///
/// ```
/// use u_csp::csp::{Domain, TimeSlot};
///
/// let domain = Domain::product(TimeSlot::sequence(4), ["A", "B", "C"]);
/// assert_eq!(domain.len(), 12);
/// assert_eq!(domain.values()[1].to_string(), "(t1, B)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Domain {
    values: Vec<DomainValue>,
}

impl Domain {
    /// Creates a domain that keeps the given value order.
    pub fn from_values(values: Vec<DomainValue>) -> Self {
        Self { values }
    }

    /// Cartesian product of slots and rooms.
    ///
    /// The outer loop runs over time slots in the given order, the inner loop
    /// over rooms in declaration order.
    pub fn product<S, R, I>(slots: S, rooms: R) -> Self
    where
        S: IntoIterator<Item = TimeSlot>,
        R: IntoIterator<Item = I>,
        I: Into<Room>,
    {
        let rooms: Vec<Room> = rooms.into_iter().map(Into::into).collect();
        let values = slots
            .into_iter()
            .flat_map(|time| {
                rooms
                    .iter()
                    .map(move |room| DomainValue::new(time, room.clone()))
            })
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[DomainValue] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a Domain {
    type Item = &'a DomainValue;
    type IntoIter = std::slice::Iter<'a, DomainValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_ordering() {
        let t1 = TimeSlot::new(1);
        let t2 = TimeSlot::new(2);
        assert!(t1 < t2);
        assert!(t2 > t1);
        assert!(t1 <= t1);
        assert_eq!(t2.index(), 2);
    }

    #[test]
    fn test_time_slot_sequence() {
        let slots: Vec<TimeSlot> = TimeSlot::sequence(3).collect();
        assert_eq!(slots, vec![TimeSlot::new(1), TimeSlot::new(2), TimeSlot::new(3)]);
        assert_eq!(slots[2].to_string(), "t3");
        assert_eq!(TimeSlot::sequence(0).count(), 0);
    }

    #[test]
    fn test_domain_value_equality_is_structural() {
        let a = DomainValue::new(TimeSlot::new(1), "A");
        assert_eq!(a, DomainValue::new(TimeSlot::new(1), "A"));
        assert_ne!(a, DomainValue::new(TimeSlot::new(1), "B"));
        assert_ne!(a, DomainValue::new(TimeSlot::new(2), "A"));
    }

    #[test]
    fn test_product_order_time_major() {
        let domain = Domain::product(TimeSlot::sequence(2), ["A", "B"]);
        let rendered: Vec<String> = domain.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["(t1, A)", "(t1, B)", "(t2, A)", "(t2, B)"]);
    }

    #[test]
    fn test_from_values_keeps_order() {
        let domain = Domain::from_values(vec![
            DomainValue::new(TimeSlot::new(2), "A"),
            DomainValue::new(TimeSlot::new(1), "A"),
        ]);
        assert_eq!(domain.values()[0].time, TimeSlot::new(2));
        assert!(!domain.is_empty());
    }

    #[test]
    fn test_empty_product() {
        let domain = Domain::product(TimeSlot::sequence(3), Vec::<&str>::new());
        assert!(domain.is_empty());
    }
}
