//! Greedy best-first search driven by the landmark evaluator.
//!
//! The driver owns the pieces of the contract the evaluator cannot enforce
//! itself: the explicit goal test (0 at goals regardless of the counting
//! formula), pruning of dead-end estimates, preferred-operator tie
//! breaking and the per-state evaluation cache that is invalidated on
//! every transition notification.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use wayfinder_config::SearchConfig;
use wayfinder_core::{OperatorId, State};

use crate::evaluator::{Estimate, Evaluation, LandmarkEvaluator};
use crate::exploration::Exploration;
use crate::successor::SuccessorGenerator;

/// A plan found by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub operators: Vec<OperatorId>,
    pub cost: u32,
}

/// The result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A plan from the initial state to a goal state.
    Plan(Plan),
    /// The whole reachable space was explored without finding a goal.
    Unsolvable,
    /// The expansion bound was hit first.
    ExhaustedBound,
}

/// Per-state cache of evaluations.
///
/// Every transition notification dirties the child's entry; the next
/// evaluation recomputes and stores it clean again. Always invalidating is
/// deliberate: checking whether the reached set actually changed could
/// save recomputation, but serving a stale estimate would be a soundness
/// bug rather than a performance one.
#[derive(Debug, Default)]
pub struct EvaluationCache {
    entries: HashMap<State, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    evaluation: Evaluation,
    dirty: bool,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &State) -> Option<&Evaluation> {
        self.entries
            .get(state)
            .filter(|entry| !entry.dirty)
            .map(|entry| &entry.evaluation)
    }

    pub fn store(&mut self, state: State, evaluation: Evaluation) {
        self.entries.insert(
            state,
            CacheEntry {
                evaluation,
                dirty: false,
            },
        );
    }

    pub fn invalidate(&mut self, state: &State) {
        if let Some(entry) = self.entries.get_mut(state) {
            entry.dirty = true;
        }
    }
}

struct SearchNode {
    state: State,
    parent: Option<(usize, OperatorId)>,
    preferred: Vec<OperatorId>,
}

/// Open-list entry; ordered so the binary max-heap pops the lowest
/// estimate first, preferring successors reached via preferred operators
/// and then older entries.
struct OpenEntry {
    h: u32,
    via_preferred: bool,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .h
            .cmp(&self.h)
            .then_with(|| self.via_preferred.cmp(&other.via_preferred))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Greedy best-first search over the evaluator's estimates.
pub struct GreedySearch<X, G> {
    evaluator: LandmarkEvaluator<X, G>,
    config: SearchConfig,
    cache: EvaluationCache,
}

impl<X: Exploration, G: SuccessorGenerator> GreedySearch<X, G> {
    pub fn new(evaluator: LandmarkEvaluator<X, G>, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            cache: EvaluationCache::new(),
        }
    }

    /// Runs the search to completion.
    pub fn run(&mut self) -> SearchOutcome {
        let task = Arc::clone(self.evaluator.task());
        let initial = task.initial_state().clone();
        self.evaluator.notify_initial_state(&initial);

        let evaluation = self.evaluate_cached(&initial);
        let Estimate::Value(initial_h) = evaluation.estimate else {
            tracing::info!("initial state is a dead end; task is unsolvable");
            return SearchOutcome::Unsolvable;
        };

        let mut nodes = vec![SearchNode {
            state: initial.clone(),
            parent: None,
            preferred: evaluation.preferred,
        }];
        let mut known: HashMap<State, usize> = HashMap::from([(initial, 0)]);
        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            h: initial_h,
            via_preferred: false,
            seq: 0,
            node: 0,
        });

        let mut best_h = initial_h;
        let mut seq = 0u64;
        let mut expansions = 0u64;

        while let Some(entry) = open.pop() {
            let node = entry.node;
            if task.is_goal_state(&nodes[node].state) {
                let plan = self.extract_plan(&task, &nodes, node);
                tracing::info!(
                    cost = plan.cost,
                    length = plan.operators.len(),
                    expansions,
                    "plan found"
                );
                return SearchOutcome::Plan(plan);
            }
            if let Some(bound) = self.config.max_expansions {
                if expansions >= bound {
                    tracing::info!(expansions, "expansion bound reached");
                    return SearchOutcome::ExhaustedBound;
                }
            }
            expansions += 1;

            let state = nodes[node].state.clone();
            let applicable = self
                .evaluator
                .successor_generator()
                .applicable_operators(&task, &state);
            for op_id in applicable {
                let child = task.operator(op_id).apply(&state);
                if self.evaluator.notify_state_transition(&state, op_id, &child) {
                    self.cache.invalidate(&child);
                }
                if known.contains_key(&child) {
                    continue;
                }

                let evaluation = self.evaluate_cached(&child);
                let Estimate::Value(h) = evaluation.estimate else {
                    tracing::trace!(%op_id, "pruning dead-end successor");
                    continue;
                };
                if h < best_h {
                    best_h = h;
                    tracing::debug!(h, expansions, "new best estimate");
                }

                let via_preferred = nodes[node].preferred.contains(&op_id);
                let child_index = nodes.len();
                known.insert(child.clone(), child_index);
                nodes.push(SearchNode {
                    state: child,
                    parent: Some((node, op_id)),
                    preferred: evaluation.preferred,
                });
                seq += 1;
                open.push(OpenEntry {
                    h,
                    via_preferred,
                    seq,
                    node: child_index,
                });
            }
        }

        tracing::info!(expansions, "open list exhausted; task is unsolvable");
        SearchOutcome::Unsolvable
    }

    fn evaluate_cached(&mut self, state: &State) -> Evaluation {
        if let Some(evaluation) = self.cache.get(state) {
            return evaluation.clone();
        }
        let evaluation = self.evaluator.evaluate(state);
        self.cache.store(state.clone(), evaluation.clone());
        evaluation
    }

    fn extract_plan(
        &self,
        task: &wayfinder_core::Task,
        nodes: &[SearchNode],
        mut node: usize,
    ) -> Plan {
        let mut operators = Vec::new();
        while let Some((parent, op_id)) = nodes[node].parent {
            operators.push(op_id);
            node = parent;
        }
        operators.reverse();
        let cost = operators
            .iter()
            .map(|&op_id| task.operator(op_id).cost())
            .sum();
        Plan { operators, cost }
    }
}
