//! Tolerance defaults for the solid engine.
//!
//! Policy
//! - A single fixed epsilon governs every inside/on classification and the
//!   solver's degeneracy checks. It is part of the external contract (results
//!   of adjacency recovery and slicing depend on it), so it is a constant
//!   rather than a per-call parameter.

/// Membership epsilon for inside/on tests, solver pivot checks, and
/// redundancy decisions.
pub const EPS: f64 = 1e-5;
