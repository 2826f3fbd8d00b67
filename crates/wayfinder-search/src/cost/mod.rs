//! Cost assignment strategies for the admissible estimate.

mod uniform;

use std::fmt::Debug;

use wayfinder_core::Task;
use wayfinder_landmarks::{LandmarkGraph, LandmarkStatuses};

pub use uniform::UniformCostAssignment;

/// Produces the admissible heuristic value by distributing operator costs
/// over the landmarks that still demand achievement.
///
/// Implementations must return a lower bound on the true remaining cost:
/// the evaluator rounds the value up (minus a small epsilon) and relies on
/// it never overestimating. The value is a pure function of the current
/// statuses and the operator costs.
///
/// The crate ships [`UniformCostAssignment`]; an optimal (LP-based)
/// partitioning can be plugged in through this same trait.
pub trait CostAssignment: Send + Debug {
    fn partitioned_value(
        &self,
        task: &Task,
        graph: &LandmarkGraph,
        statuses: &LandmarkStatuses,
    ) -> f64;
}
