//! CSP model definition.

use super::constraint::Constraint;
use super::domain::Domain;
use super::error::ModelError;
use super::store::ConstraintStore;
use std::collections::HashSet;

/// A constraint satisfaction problem instance.
///
/// Holds the ordered variable list, the constraint store and the shared
/// domain. The variable order doubles as the tie-break order of the
/// variable-selection heuristic.
///
/// # Examples
///
/// ```
/// use u_csp::csp::{Constraint, CspModel, Domain, TimeSlot};
///
/// let mut model = CspModel::new("exams");
/// model.add_variable("E1", vec![Constraint::SameValue, Constraint::before(["E2"])]);
/// model.add_variable("E2", vec![Constraint::SameValue]);
/// model.set_domain(Domain::product(TimeSlot::sequence(2), ["A"]));
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CspModel {
    /// Model name.
    pub name: String,
    variables: Vec<String>,
    store: ConstraintStore,
    domain: Domain,
}

impl CspModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            store: ConstraintStore::new(),
            domain: Domain::default(),
        }
    }

    /// Declares a variable and registers its constraints.
    ///
    /// Declaring the same name twice is reported by [`CspModel::validate`].
    pub fn add_variable(&mut self, name: impl Into<String>, constraints: Vec<Constraint>) {
        let name = name.into();
        self.store.register(name.clone(), constraints);
        self.variables.push(name);
    }

    /// Registers (overwrites) the constraints of a variable.
    ///
    /// Unlike [`CspModel::add_variable`] this does not declare the name.
    pub fn register_constraints(&mut self, name: impl Into<String>, constraints: Vec<Constraint>) {
        self.store.register(name, constraints);
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    /// Builder: sets the domain and returns self.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Variable names in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn store(&self) -> &ConstraintStore {
        &self.store
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.store.constraint_count()
    }

    /// Validates the model for consistency.
    ///
    /// Checks that the domain is non-empty, that names are unique, and that
    /// every referenced variable exists and differs from the owner.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.domain.is_empty() {
            return Err(ModelError::EmptyDomain);
        }

        let mut declared = HashSet::with_capacity(self.variables.len());
        for name in &self.variables {
            if !declared.insert(name.as_str()) {
                return Err(ModelError::DuplicateVariable(name.clone()));
            }
        }

        for (owner, constraints) in self.store.iter() {
            if !declared.contains(owner) {
                return Err(ModelError::UnknownVariable(owner.to_string()));
            }
            for target in constraints.iter().flat_map(|c| c.targets()) {
                if target == owner {
                    return Err(ModelError::SelfReference {
                        variable: owner.to_string(),
                    });
                }
                if !declared.contains(target) {
                    return Err(ModelError::UnknownTarget {
                        variable: owner.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
