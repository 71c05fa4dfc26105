/// Core evaluation logic for expressions.
///
/// Contains the evaluation context, expression dispatch, and shared lookup
/// helpers.
pub mod core;

/// Binary operator evaluation.
///
/// Implements the four canonical arithmetic operators with integer/real
/// promotion and division-by-zero checking.
pub mod binary;

/// Statement evaluation.
///
/// Implements logic for executing top-level statements: bindings, output,
/// anchor and relational declarations, queries, and `when` clauses.
pub mod statement;

/// When-clause dispatch.
///
/// Resolves a `when` subject and reference anchor and decides whether the
/// position qualifier holds.
pub mod when;
