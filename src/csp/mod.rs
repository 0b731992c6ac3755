//! Backtracking Constraint Satisfaction (CSP).
//!
//! # Key Components
//!
//! - **Values**: [`TimeSlot`], [`Room`], [`DomainValue`], [`Domain`]
//! - **Variables**: [`Variable`] and the partial [`Assignment`]
//! - **Constraints**: [`Constraint`] — SameValue, Before, After, Hall
//! - **Store**: [`ConstraintStore`] — per-variable constraint lists and the
//!   variable-ordering heuristic
//! - **Model**: [`CspModel`] — variables, constraints and domain
//! - **Checker**: [`ConsistencyChecker`] — incremental and post-hoc checks
//! - **Runner**: [`CspRunner`] — recursive backtracking search
//!
//! # Design
//!
//! The search is purely sequential and deterministic: variables are selected
//! by constraint-declaration count (ties go to the earliest registered
//! variable) and domain values are tried in the order the domain was built.
//! No propagation (AC-3), learning or optimization is performed.
//!
//! # References
//!
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", ch. 6

mod config;
mod consistency;
mod constraint;
mod domain;
mod error;
mod model;
mod runner;
mod store;
mod variables;

pub use config::{OrderingCheck, SolverConfig};
pub use consistency::{ConsistencyChecker, Violation};
pub use constraint::Constraint;
pub use domain::{Domain, DomainValue, Room, TimeSlot};
pub use error::ModelError;
pub use model::CspModel;
pub use runner::{AbortReason, CspRunner, SearchStats, SolveResult, SolveStatus};
pub use store::ConstraintStore;
pub use variables::{Assignment, Variable};
