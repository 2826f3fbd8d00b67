//! Landmark leaf selection and the interestingness policy.

use wayfinder_core::{Fact, State};
use wayfinder_landmarks::{LandmarkGraph, LandmarkId, LandmarkNode, LandmarkStatuses};

/// Whether disjunctive landmarks may contribute leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisjunctiveLandmarks {
    Included,
    Excluded,
}

/// Decides whether a landmark is worth steering toward right now.
///
/// While unreached landmarks remain, a landmark is interesting iff it is
/// unreached and all of its order-parents are reached (it is actionable
/// next). Once every landmark has been reached, the only useful signal
/// left is a goal landmark whose truth has lapsed; progress then means
/// re-establishing it.
pub fn landmark_is_interesting(
    graph: &LandmarkGraph,
    state: &State,
    statuses: &LandmarkStatuses,
    id: LandmarkId,
) -> bool {
    let node = graph.node(id);
    if !statuses.all_reached() {
        !statuses.is_reached(id) && !orders_disobeyed(node, statuses)
    } else {
        node.is_goal() && !node.is_true_in(state)
    }
}

/// A node's orders are disobeyed iff at least one parent, of any order
/// type, is missing from the reached set.
fn orders_disobeyed(node: &LandmarkNode, statuses: &LandmarkStatuses) -> bool {
    node.parents()
        .iter()
        .any(|&(parent, _)| !statuses.is_reached(parent))
}

/// Collects the current landmark leaves: the fact pairs of every
/// interesting landmark, in stable graph order. The result serves as the
/// disjunctive goal set for the relaxed-exploration fallback.
pub fn collect_leaves(
    graph: &LandmarkGraph,
    state: &State,
    statuses: &LandmarkStatuses,
    disjunctive: DisjunctiveLandmarks,
) -> Vec<Fact> {
    let mut leaves = Vec::new();
    for (id, node) in graph.nodes() {
        if disjunctive == DisjunctiveLandmarks::Excluded && node.is_disjunctive() {
            continue;
        }
        if landmark_is_interesting(graph, state, statuses, id) {
            leaves.extend_from_slice(node.facts());
        }
    }
    leaves
}
