//! Backtracking search loop.

use super::config::SolverConfig;
use super::consistency::{ConsistencyChecker, Violation};
use super::domain::DomainValue;
use super::error::ModelError;
use super::model::CspModel;
use super::variables::{Assignment, Variable};
use log::{debug, info, trace, warn};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a search stopped before reaching a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AbortReason {
    /// `max_steps` candidate evaluations were spent.
    StepLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Terminal state of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// A complete, consistent assignment was found.
    Solved,
    /// The search space was exhausted: no solution exists for this
    /// domain and constraint set.
    Unsatisfiable,
    /// The search stopped early; nothing is known about satisfiability.
    Aborted(AbortReason),
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Candidate values evaluated by the consistency checker.
    pub steps: usize,
    /// Candidates committed to the assignment.
    pub commits: usize,
    /// Commits undone after a failed subtree.
    pub backtracks: usize,
    /// Deepest assignment size reached.
    pub max_depth: usize,
}

/// Result of a backtracking run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Terminal state.
    pub status: SolveStatus,

    /// The complete assignment, present only when `status` is `Solved`.
    pub assignment: Option<Assignment>,

    /// Search counters.
    pub stats: SearchStats,

    /// Variable chosen by the heuristic at each selection, in order.
    ///
    /// A variable appears again every time the search re-enters its level
    /// after backtracking.
    pub selection_order: Vec<String>,

    /// Post-hoc violations of the found assignment.
    ///
    /// Always empty unless `OrderingCheck::Lazy` let an ordering constraint
    /// through, or verification was disabled.
    pub violations: Vec<Violation>,

    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl SolveResult {
    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }

    /// Value assigned to `name` in the solution.
    pub fn value(&self, name: &str) -> Option<&DomainValue> {
        self.assignment.as_ref()?.get(name)
    }
}

/// Executes the backtracking search.
///
/// # Examples
///
/// ```
/// use u_csp::csp::{Constraint, CspModel, CspRunner, Domain, SolverConfig, TimeSlot};
///
/// let mut model = CspModel::new("exams");
/// model.add_variable("A", vec![Constraint::SameValue, Constraint::before(["C"])]);
/// model.add_variable("B", vec![Constraint::SameValue]);
/// model.add_variable("C", vec![Constraint::SameValue]);
/// model.set_domain(Domain::product(TimeSlot::sequence(2), ["X", "Y"]));
///
/// let result = CspRunner::run(&model, &SolverConfig::default()).unwrap();
/// assert!(result.is_solved());
/// assert!(result.value("A").unwrap().time < result.value("C").unwrap().time);
/// ```
pub struct CspRunner;

impl CspRunner {
    /// Validates the model and runs the search.
    pub fn run(model: &CspModel, config: &SolverConfig) -> Result<SolveResult, ModelError> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// Model errors are returned before any search happens. Unsatisfiable
    /// and aborted searches are reported through [`SolveResult::status`].
    pub fn run_with_cancel(
        model: &CspModel,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult, ModelError> {
        model.validate()?;

        let checker = ConsistencyChecker::new(model.store(), config.ordering);
        let mut search = Search {
            model,
            config,
            checker,
            cancel: cancel.as_deref(),
            started: Instant::now(),
            assignment: Assignment::new(),
            unassigned: (0..model.variable_count()).collect(),
            stats: SearchStats::default(),
            selection_order: Vec::new(),
        };

        let outcome = search.backtrack();
        let solve_time_ms = search.started.elapsed().as_millis() as u64;
        let Search {
            assignment,
            stats,
            selection_order,
            ..
        } = search;

        let (status, assignment, violations) = match outcome {
            Outcome::Success => {
                let violations = if config.verify_solution {
                    checker.verify(&assignment)
                } else {
                    Vec::new()
                };
                for violation in &violations {
                    warn!("{}: solution violates {}", model.name, violation);
                }
                (SolveStatus::Solved, Some(assignment), violations)
            }
            Outcome::Failure => (SolveStatus::Unsatisfiable, None, Vec::new()),
            Outcome::Aborted(reason) => {
                warn!(
                    "{}: search aborted ({:?}) after {} steps",
                    model.name, reason, stats.steps
                );
                (SolveStatus::Aborted(reason), None, Vec::new())
            }
        };

        info!(
            "{}: {:?} after {} steps, {} backtracks in {} ms",
            model.name, status, stats.steps, stats.backtracks, solve_time_ms
        );

        Ok(SolveResult {
            status,
            assignment,
            stats,
            selection_order,
            violations,
            solve_time_ms,
        })
    }
}

/// Outcome of one level of the recursion.
enum Outcome {
    Success,
    Failure,
    Aborted(AbortReason),
}

/// Mutable search state, owned by a single run.
struct Search<'a> {
    model: &'a CspModel,
    config: &'a SolverConfig,
    checker: ConsistencyChecker<'a>,
    cancel: Option<&'a AtomicBool>,
    started: Instant,
    assignment: Assignment,
    /// Indices into `model.variables()`; iterates in declaration order.
    unassigned: BTreeSet<usize>,
    stats: SearchStats,
    selection_order: Vec<String>,
}

impl Search<'_> {
    fn backtrack(&mut self) -> Outcome {
        let model = self.model;
        if self.assignment.len() == model.variable_count() {
            return Outcome::Success;
        }

        let index = self.select_unassigned();
        let name = model.variables()[index].as_str();
        self.selection_order.push(name.to_string());

        for value in model.domain() {
            if let Some(reason) = self.abort_reason() {
                return Outcome::Aborted(reason);
            }
            self.stats.steps += 1;

            let candidate = Variable::new(name).with_value(value.clone());
            if let Err(violation) = self.checker.check(&candidate, &self.assignment) {
                debug!("reject {candidate}: {violation}");
                continue;
            }

            self.assignment.assign(name, value.clone());
            self.unassigned.remove(&index);
            self.stats.commits += 1;
            self.stats.max_depth = self.stats.max_depth.max(self.assignment.len());
            trace!("commit {candidate} at depth {}", self.assignment.len());

            match self.backtrack() {
                Outcome::Failure => {
                    self.assignment.unassign(name);
                    self.unassigned.insert(index);
                    self.stats.backtracks += 1;
                    trace!("undo {candidate}");
                }
                done => return done,
            }
        }

        Outcome::Failure
    }

    /// Index of the most constrained unassigned variable.
    ///
    /// Only called while the assignment is incomplete, so an empty
    /// unassigned set is a bookkeeping bug.
    fn select_unassigned(&self) -> usize {
        let variables = self.model.variables();
        let chosen = self
            .model
            .store()
            .most_constrained_unassigned(self.unassigned.iter().map(|&i| variables[i].as_str()))
            .expect("unassigned set is empty while the assignment is incomplete");
        self.unassigned
            .iter()
            .copied()
            .find(|&i| variables[i] == chosen)
            .expect("heuristic returned a variable outside the unassigned set")
    }

    fn abort_reason(&self) -> Option<AbortReason> {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(AbortReason::Cancelled);
            }
        }
        if self.config.max_steps > 0 && self.stats.steps >= self.config.max_steps {
            return Some(AbortReason::StepLimit);
        }
        if self.config.time_limit_ms > 0
            && self.started.elapsed().as_millis() >= u128::from(self.config.time_limit_ms)
        {
            return Some(AbortReason::TimeLimit);
        }
        None
    }
}
