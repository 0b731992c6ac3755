//! Model validation errors.

use thiserror::Error;

/// A malformed problem instance, detected before search starts.
///
/// These are reported separately from an unsatisfiable instance: a model
/// that fails validation is never searched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("the domain has no values")]
    EmptyDomain,
    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),
    #[error("constraints are registered for undeclared variable `{0}`")]
    UnknownVariable(String),
    #[error("variable `{variable}` references undeclared variable `{target}`")]
    UnknownTarget { variable: String, target: String },
    #[error("variable `{variable}` is ordered relative to itself")]
    SelfReference { variable: String },
}
