//! Uniform cost partitioning.

use wayfinder_core::{OperatorId, Task};
use wayfinder_landmarks::{
    active_landmarks, LandmarkGraph, LandmarkNode, LandmarkStatus, LandmarkStatuses,
};

use super::CostAssignment;

/// Distributes each operator's cost uniformly over the active landmarks it
/// achieves; a landmark's partitioned value is the cheapest share any of
/// its relevant achievers offers, and the heuristic value is the sum.
///
/// Unreached landmarks draw on their first achievers, needed-again
/// landmarks on their possible achievers. Because every operator's cost is
/// split (never duplicated) across the landmarks it serves, the sum never
/// exceeds the true remaining cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostAssignment;

impl UniformCostAssignment {
    pub fn new() -> Self {
        Self
    }
}

fn relevant_achievers(node: &LandmarkNode, status: LandmarkStatus) -> &[OperatorId] {
    match status {
        LandmarkStatus::NotReached => node.first_achievers(),
        LandmarkStatus::NeededAgain => node.possible_achievers(),
        LandmarkStatus::Reached => &[],
    }
}

impl CostAssignment for UniformCostAssignment {
    fn partitioned_value(
        &self,
        task: &Task,
        graph: &LandmarkGraph,
        statuses: &LandmarkStatuses,
    ) -> f64 {
        // How many active landmarks each operator serves.
        let mut shares = vec![0u32; task.operators().len()];
        for id in active_landmarks(statuses) {
            let node = graph.node(id);
            for &op in relevant_achievers(node, statuses.status(id)) {
                shares[op.0] += 1;
            }
        }

        let mut h = 0.0;
        for id in active_landmarks(statuses) {
            let node = graph.node(id);
            let achievers = relevant_achievers(node, statuses.status(id));
            // An active landmark without a relevant achiever is exactly the
            // status manager's dead-end verdict; the evaluator never asks
            // for a value then. Contributing nothing keeps the bound valid
            // either way.
            debug_assert!(
                !achievers.is_empty(),
                "active landmark {id} has no achiever; the dead-end check should have fired"
            );
            let cheapest_share = achievers
                .iter()
                .map(|&op| f64::from(task.operator(op).cost()) / f64::from(shares[op.0]))
                .fold(f64::INFINITY, f64::min);
            if cheapest_share.is_finite() {
                h += cheapest_share;
            }
        }
        h
    }
}
