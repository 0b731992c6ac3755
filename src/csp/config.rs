//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `Before`/`After` constraints are checked during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingCheck {
    /// Also evaluate the constraints of already-assigned variables that name
    /// the candidate. Every binary constraint is enforced as soon as both of
    /// its variables are assigned, so found solutions always verify.
    #[default]
    Bidirectional,

    /// Evaluate only the candidate's own constraints, skipping unassigned
    /// targets. A `Before`/`After` whose owner is assigned before its target
    /// is never enforced; found solutions may fail post-hoc verification.
    Lazy,
}

/// Configuration for the backtracking solver.
///
/// # Examples
///
/// ```
/// use u_csp::csp::{OrderingCheck, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_ordering(OrderingCheck::Lazy)
///     .with_max_steps(10_000)
///     .with_time_limit_ms(500);
/// assert_eq!(config.max_steps, 10_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Ordering-constraint check policy.
    pub ordering: OrderingCheck,

    /// Maximum candidate evaluations (hard budget). 0 = no limit.
    pub max_steps: usize,

    /// Maximum wall-clock time in milliseconds. 0 = no limit.
    pub time_limit_ms: u64,

    /// Re-check a found solution against every constraint.
    pub verify_solution: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingCheck::default(),
            max_steps: 0,
            time_limit_ms: 0,
            verify_solution: true,
        }
    }
}

impl SolverConfig {
    pub fn with_ordering(mut self, ordering: OrderingCheck) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_verify_solution(mut self, verify: bool) -> Self {
        self.verify_solution = verify;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::csp::{AbortReason, Domain, SearchStats, SolveStatus, TimeSlot};

    #[test]
    fn test_config_from_json() {
        let json = r#"{"ordering":"Lazy","max_steps":500,"time_limit_ms":0,"verify_solution":true}"#;
        let config: SolverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.ordering, OrderingCheck::Lazy);
        assert_eq!(config.max_steps, 500);
        assert!(config.verify_solution);
    }

    #[test]
    fn test_domain_json_shape() {
        let domain = Domain::product(TimeSlot::sequence(1), ["A"]);
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, r#"{"values":[{"time":1,"room":"A"}]}"#);
        let back: Domain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, domain);
    }

    #[test]
    fn test_result_summary_serializes() {
        let status = SolveStatus::Aborted(AbortReason::TimeLimit);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"Aborted":"TimeLimit"}"#
        );
        let stats = SearchStats {
            steps: 6,
            commits: 3,
            backtracks: 0,
            max_depth: 3,
        };
        let back: SearchStats =
            serde_json::from_str(&serde_json::to_string(&stats).unwrap()).unwrap();
        assert_eq!(back, stats);
    }
}
