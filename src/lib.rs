//! Domain-agnostic constraint satisfaction for timetabling problems.
//!
//! Assigns every variable (e.g. an exam) a `(time slot, room)` pair such that
//! no constraint is violated:
//!
//! - **SameValue**: mutual exclusion, no two variables share a value.
//! - **Before / After**: strict ordering of time slots relative to other variables.
//! - **Hall**: restriction of the room to an allowed set.
//!
//! The search is a depth-first backtracking engine with a degree-style
//! "most constrained variable" ordering and an incremental consistency check.
//! It returns the first complete consistent assignment it discovers, or
//! reports that none exists.
//!
//! # Architecture
//!
//! The problem instance (variable names, constraint lists, domain values) is
//! plain data supplied by the caller through [`csp::CspModel`]. Sourcing it
//! from files and rendering the result are left to consumers; enable the
//! `serde` feature to (de)serialize the model types.

pub mod csp;
