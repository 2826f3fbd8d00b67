//! Evaluator construction errors.

use thiserror::Error;

/// Fatal configuration errors raised when building a
/// [`LandmarkEvaluator`](crate::LandmarkEvaluator).
///
/// Each illegal combination gets its own variant so the surrounding driver
/// can report a precise diagnostic and decide whether to terminate. None of
/// these are recoverable by retrying with the same inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluatorError {
    /// Reasonable (or obedient-reasonable) orderings break the lower-bound
    /// property of cost partitioning.
    #[error("reasonable orderings should not be used for admissible estimates")]
    ReasonableOrderings,

    /// Cost partitioning cannot account for derived predicates.
    #[error("cost partitioning does not support axioms")]
    AxiomsUnsupported,

    /// The task has conditional effects but the landmark generation method
    /// did not declare support for them.
    #[error("conditional effects are not supported by the landmark generation method")]
    ConditionalEffectsUnsupported,

    /// Optimal cost partitioning needs an LP-backed strategy supplied by
    /// the caller.
    #[error("optimal cost partitioning requires a caller-supplied cost assignment strategy")]
    MissingCostAssignment,
}
