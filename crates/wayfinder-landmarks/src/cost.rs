//! Cost accounting over the current landmark statuses.

use crate::graph::LandmarkGraph;
use crate::node::LandmarkId;
use crate::status::{LandmarkStatus, LandmarkStatuses};

/// The three sums the counting heuristic is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTotals {
    /// Summed cost of all landmarks.
    pub total: u32,
    /// Summed cost of landmarks reached at least once.
    pub reached: u32,
    /// Summed cost of reached landmarks that are owed a second
    /// achievement. Always a subset of `reached`.
    pub needed: u32,
}

impl CostTotals {
    /// The counting heuristic value `total - reached + needed`.
    ///
    /// `needed` only counts landmarks already counted in `reached`, so the
    /// result can never go negative.
    pub fn counting_value(self) -> u32 {
        self.total - self.reached + self.needed
    }
}

/// Computes the cost totals for one evaluation.
///
/// This is a pure function of the graph and the statuses derived for the
/// current state; there is nothing to reset between calls.
pub fn cost_totals(graph: &LandmarkGraph, statuses: &LandmarkStatuses) -> CostTotals {
    let mut totals = CostTotals {
        total: 0,
        reached: 0,
        needed: 0,
    };
    for (id, node) in graph.nodes() {
        let cost = node.cost();
        totals.total += cost;
        match statuses.status(id) {
            LandmarkStatus::NotReached => {}
            LandmarkStatus::Reached => totals.reached += cost,
            LandmarkStatus::NeededAgain => {
                totals.reached += cost;
                totals.needed += cost;
            }
        }
    }
    debug_assert!(totals.reached <= totals.total);
    debug_assert!(totals.needed <= totals.reached);
    totals
}

/// Ids of the landmarks that still demand achievement: unreached ones and
/// those needed again. This is the active set cost partitioning runs over.
pub fn active_landmarks(statuses: &LandmarkStatuses) -> impl Iterator<Item = LandmarkId> + '_ {
    (0..statuses.len())
        .map(LandmarkId)
        .filter(move |&id| statuses.status(id) != LandmarkStatus::Reached)
}
