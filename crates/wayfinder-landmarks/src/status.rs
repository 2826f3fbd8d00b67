//! Per-state landmark bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use wayfinder_core::{OperatorId, State};

use crate::graph::LandmarkGraph;
use crate::node::{LandmarkId, LandmarkNode, OrderType};
use crate::set::LandmarkBitset;

/// Status of a single landmark relative to the current evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkStatus {
    /// Never achieved on the path to this state.
    NotReached,
    /// Achieved at some point on the path to this state.
    Reached,
    /// Achieved before, but its truth has lapsed and a second achievement
    /// is still owed.
    NeededAgain,
}

/// The per-landmark statuses derived for one evaluation call.
///
/// Built fresh by [`LandmarkStatusManager::update`] and discarded after the
/// evaluation; never persisted across calls. Landmarks with status
/// `Reached` or `NeededAgain` count as members of the reached set.
#[derive(Debug, Clone)]
pub struct LandmarkStatuses {
    statuses: Vec<LandmarkStatus>,
    reached_count: usize,
    dead_end: bool,
}

impl LandmarkStatuses {
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn status(&self, id: LandmarkId) -> LandmarkStatus {
        self.statuses[id.0]
    }

    /// True if the landmark has been achieved at least once, including
    /// landmarks currently owed a second achievement.
    pub fn is_reached(&self, id: LandmarkId) -> bool {
        self.statuses[id.0] != LandmarkStatus::NotReached
    }

    /// Number of reached landmarks; never exceeds the landmark count.
    pub fn reached_count(&self) -> usize {
        self.reached_count
    }

    /// True if every landmark has been reached at least once.
    pub fn all_reached(&self) -> bool {
        self.reached_count == self.statuses.len()
    }

    /// The structural dead-end verdict: some unreached landmark has no
    /// first achiever, or some needed-again landmark has no possible
    /// achiever.
    pub fn is_dead_end(&self) -> bool {
        self.dead_end
    }
}

/// Per-state cache of which landmarks are reached, with incremental
/// updates along state transitions.
///
/// This is the evaluator's only source of reached information. The typical
/// call sequence mirrors a forward search: [`initialize`] once for the
/// initial state, [`notify_transition`] for every generated successor, and
/// [`update`] at the start of every evaluation.
///
/// [`initialize`]: LandmarkStatusManager::initialize
/// [`notify_transition`]: LandmarkStatusManager::notify_transition
/// [`update`]: LandmarkStatusManager::update
#[derive(Debug)]
pub struct LandmarkStatusManager {
    graph: Arc<LandmarkGraph>,
    reached_by_state: HashMap<State, LandmarkBitset>,
}

impl LandmarkStatusManager {
    pub fn new(graph: Arc<LandmarkGraph>) -> Self {
        Self {
            graph,
            reached_by_state: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &LandmarkGraph {
        &self.graph
    }

    /// Computes the initial state's reached set from scratch. Must be
    /// called exactly once, before any other query.
    ///
    /// A landmark counts as initially reached iff it has no ordering
    /// parents and holds in the initial state. Landmarks achieved ahead of
    /// their parents are deliberately not counted; this is what makes the
    /// counting heuristic legally nonzero at some goal states.
    pub fn initialize(&mut self, initial: &State) {
        let mut reached = LandmarkBitset::new(self.graph.len());
        for (id, node) in self.graph.nodes() {
            if node.parents().is_empty() && node.is_true_in(initial) {
                reached.insert(id);
            }
        }
        tracing::debug!(
            reached = reached.count(),
            landmarks = self.graph.len(),
            "initialized landmark statuses for the initial state"
        );
        self.reached_by_state.insert(initial.clone(), reached);
    }

    /// Incrementally derives the child state's reached set from the
    /// parent's: a landmark becomes reached iff it holds in the child and
    /// all of its ordering parents were reached in the parent.
    ///
    /// A state reachable along several paths keeps only the landmarks
    /// reached on every known path.
    pub fn notify_transition(&mut self, parent: &State, op: OperatorId, child: &State) {
        let parent_reached = match self.reached_by_state.get(parent) {
            Some(reached) => reached.clone(),
            None => {
                tracing::warn!(%op, "transition from an unknown parent state; seeding from scratch");
                self.seed(parent)
            }
        };

        let mut child_reached = parent_reached.clone();
        for (id, node) in self.graph.nodes() {
            if !child_reached.contains(id)
                && node.is_true_in(child)
                && Self::parents_reached(node, &parent_reached)
            {
                child_reached.insert(id);
            }
        }

        match self.reached_by_state.get_mut(child) {
            Some(existing) => {
                let mut merged = LandmarkBitset::new(self.graph.len());
                for id in existing.iter() {
                    if child_reached.contains(id) {
                        merged.insert(id);
                    }
                }
                *existing = merged;
            }
            None => {
                self.reached_by_state.insert(child.clone(), child_reached);
            }
        }
    }

    /// Derives the per-landmark statuses and the dead-end verdict for
    /// `state`. Idempotent: calling twice with no intervening transition
    /// yields the same result both times.
    pub fn update(&mut self, state: &State) -> LandmarkStatuses {
        if !self.reached_by_state.contains_key(state) {
            tracing::warn!("status update for an unknown state; seeding from scratch");
            let seeded = self.seed(state);
            self.reached_by_state.insert(state.clone(), seeded);
        }
        let reached = &self.reached_by_state[state];

        let mut statuses = Vec::with_capacity(self.graph.len());
        let mut reached_count = 0;
        let mut dead_end = false;
        for (id, node) in self.graph.nodes() {
            let status = if !reached.contains(id) {
                if node.first_achievers().is_empty() {
                    dead_end = true;
                }
                LandmarkStatus::NotReached
            } else if self.needed_again(node, state, reached) {
                if node.possible_achievers().is_empty() {
                    dead_end = true;
                }
                reached_count += 1;
                LandmarkStatus::NeededAgain
            } else {
                reached_count += 1;
                LandmarkStatus::Reached
            };
            statuses.push(status);
        }

        if dead_end {
            tracing::debug!("state is a structural dead end: some landmark has no achiever left");
        }
        LandmarkStatuses {
            statuses,
            reached_count,
            dead_end,
        }
    }

    /// The stored reached set for `state`, if the manager has seen it.
    pub fn reached(&self, state: &State) -> Option<&LandmarkBitset> {
        self.reached_by_state.get(state)
    }

    fn seed(&self, state: &State) -> LandmarkBitset {
        let mut reached = LandmarkBitset::new(self.graph.len());
        for (id, node) in self.graph.nodes() {
            if node.parents().is_empty() && node.is_true_in(state) {
                reached.insert(id);
            }
        }
        reached
    }

    fn parents_reached(node: &LandmarkNode, reached: &LandmarkBitset) -> bool {
        node.parents()
            .iter()
            .all(|&(parent, _)| reached.contains(parent))
    }

    /// A reached landmark is owed a second achievement if it is currently
    /// false and either is a goal landmark or must precede (necessary
    /// order) a child that is still unreached.
    fn needed_again(&self, node: &LandmarkNode, state: &State, reached: &LandmarkBitset) -> bool {
        if node.is_true_in(state) {
            return false;
        }
        node.is_goal()
            || node
                .children()
                .iter()
                .any(|&(child, order)| order == OrderType::Necessary && !reached.contains(child))
    }
}
