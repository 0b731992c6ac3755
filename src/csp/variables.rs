//! CSP variable types.

use super::domain::DomainValue;
use std::collections::HashMap;
use std::fmt;

/// A named variable with an optional assigned value.
///
/// The name is the identity of the variable and never changes. The value
/// moves between unassigned and assigned as the search commits and
/// backtracks; each trial builds a fresh `Variable` rather than mutating a
/// shared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: Option<DomainValue>,
}

impl Variable {
    /// Creates an unassigned variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Builder: returns the variable holding `value`.
    pub fn with_value(mut self, value: DomainValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&DomainValue> {
        self.value.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.value.is_some()
    }

    /// Assigns `value` in place.
    ///
    /// For consumers that track a variable's lifecycle themselves; the
    /// solver builds a fresh candidate per trial with [`Variable::with_value`].
    pub fn assign(&mut self, value: DomainValue) {
        self.value = Some(value);
    }

    /// Reverts the variable to unassigned, returning the previous value.
    ///
    /// Counterpart of [`Variable::assign`] for consumer-side bookkeeping.
    pub fn unassign(&mut self) -> Option<DomainValue> {
        self.value.take()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.name, value),
            None => write!(f, "{}: ()", self.name),
        }
    }
}

/// The current partial solution: variable name to assigned value.
///
/// Entries are kept in discovery order. The search only ever removes the
/// most recent entry (backtracking is LIFO), which keeps lookup and undo cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<String, DomainValue>,
    order: Vec<String>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits `value` for `name`, replacing any earlier value.
    pub fn assign(&mut self, name: impl Into<String>, value: DomainValue) {
        let name = name.into();
        if self.values.insert(name.clone(), value).is_none() {
            self.order.push(name);
        }
    }

    /// Removes the entry for `name`, returning its value.
    pub fn unassign(&mut self, name: &str) -> Option<DomainValue> {
        let value = self.values.remove(name)?;
        if self.order.last().map(String::as_str) == Some(name) {
            self.order.pop();
        } else {
            self.order.retain(|n| n != name);
        }
        Some(value)
    }

    pub fn get(&self, name: &str) -> Option<&DomainValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(name, value)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainValue)> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), &self.values[name]))
    }

    /// Names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Materializes the entries as assigned [`Variable`]s in discovery order.
    pub fn variables(&self) -> Vec<Variable> {
        self.iter()
            .map(|(name, value)| Variable::new(name).with_value(value.clone()))
            .collect()
    }

    /// Consumes the assignment into a plain name-to-value map.
    pub fn into_map(self) -> HashMap<String, DomainValue> {
        self.values
    }
}
