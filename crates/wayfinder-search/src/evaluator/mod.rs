//! The landmark heuristic evaluator.
//!
//! For every visited state the evaluator produces a remaining-cost
//! estimate, a proven-dead-end verdict and (optionally) a set of preferred
//! operators. It orchestrates the landmark status manager, the bound cost
//! assignment strategy and the relaxed-exploration fallback; the landmark
//! graph itself is built elsewhere and only queried here.

mod leaves;

use std::sync::Arc;

use smallvec::SmallVec;

use wayfinder_config::{CostPartitioningMode, HeuristicConfig};
use wayfinder_core::{OperatorId, State, Task};
use wayfinder_landmarks::{cost_totals, LandmarkGraph, LandmarkStatusManager, LandmarkStatuses};

use crate::cost::{CostAssignment, UniformCostAssignment};
use crate::error::EvaluatorError;
use crate::exploration::{ClearOnExit, Exploration, RelaxedExploration};
use crate::successor::{SimpleSuccessorGenerator, SuccessorGenerator};

pub use leaves::{collect_leaves, landmark_is_interesting, DisjunctiveLandmarks};

/// Rounding guard for the fractional admissible value: the bound is
/// conceptually an integer, so values a hair above it are float noise, not
/// information.
const EPSILON: f64 = 0.01;

/// The outcome of evaluating one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    /// The state provably has no path to the goal.
    DeadEnd,
    /// Estimated remaining cost; never negative by construction.
    Value(u32),
}

impl Estimate {
    pub fn is_dead_end(self) -> bool {
        matches!(self, Estimate::DeadEnd)
    }

    pub fn value(self) -> Option<u32> {
        match self {
            Estimate::DeadEnd => None,
            Estimate::Value(v) => Some(v),
        }
    }
}

/// An estimate plus the preferred operators found along the way.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub estimate: Estimate,
    pub preferred: Vec<OperatorId>,
}

impl Evaluation {
    fn dead_end() -> Self {
        Self {
            estimate: Estimate::DeadEnd,
            preferred: Vec::new(),
        }
    }

    fn value(h: u32) -> Self {
        Self {
            estimate: Estimate::Value(h),
            preferred: Vec::new(),
        }
    }
}

/// The two stages of helpful-action detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelpfulStage {
    /// Scan applicable operators for ones that directly achieve an
    /// interesting landmark.
    DirectScan,
    /// Plan toward the landmark leaves with the relaxed exploration.
    Exploration,
}

/// Builder for [`LandmarkEvaluator`].
///
/// Validates the admissibility configuration once; the resulting evaluator
/// is immutable in its strategy choices.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wayfinder_config::HeuristicConfig;
/// use wayfinder_core::{Effect, Fact, TaskBuilder};
/// use wayfinder_landmarks::LandmarkGraphBuilder;
/// use wayfinder_search::LandmarkEvaluatorBuilder;
///
/// let mut tb = TaskBuilder::new();
/// let v = tb.add_variable("v", 2);
/// let op = tb.add_operator("set", 1, vec![], vec![Effect::new(Fact::new(v, 1))]);
/// tb.add_goal(Fact::new(v, 1));
/// let task = Arc::new(tb.build().unwrap());
///
/// let mut gb = LandmarkGraphBuilder::new();
/// let lm = gb.add_simple(Fact::new(v, 1));
/// gb.mark_goal(lm);
/// gb.add_first_achiever(lm, op);
/// let graph = Arc::new(gb.build().unwrap());
///
/// let mut evaluator = LandmarkEvaluatorBuilder::new(task.clone(), graph)
///     .with_config(HeuristicConfig { admissible: true, ..Default::default() })
///     .build()
///     .unwrap();
/// evaluator.notify_initial_state(task.initial_state());
/// ```
pub struct LandmarkEvaluatorBuilder {
    task: Arc<Task>,
    graph: Arc<LandmarkGraph>,
    config: HeuristicConfig,
    generator_supports_conditional_effects: bool,
    cost_assignment: Option<Box<dyn CostAssignment>>,
}

impl LandmarkEvaluatorBuilder {
    pub fn new(task: Arc<Task>, graph: Arc<LandmarkGraph>) -> Self {
        Self {
            task,
            graph,
            config: HeuristicConfig::default(),
            generator_supports_conditional_effects: false,
            cost_assignment: None,
        }
    }

    pub fn with_config(mut self, config: HeuristicConfig) -> Self {
        self.config = config;
        self
    }

    /// Declares whether the landmark generation method that produced the
    /// graph supports conditional effects. Defaults to false.
    pub fn generator_supports_conditional_effects(mut self, supported: bool) -> Self {
        self.generator_supports_conditional_effects = supported;
        self
    }

    /// Supplies a cost assignment strategy, e.g. an LP-backed optimal
    /// partitioning. Only consulted in admissible mode.
    pub fn with_cost_assignment(mut self, strategy: Box<dyn CostAssignment>) -> Self {
        self.cost_assignment = Some(strategy);
        self
    }

    /// Validates the configuration and builds an evaluator with the
    /// default collaborators.
    pub fn build(
        self,
    ) -> Result<LandmarkEvaluator<RelaxedExploration, SimpleSuccessorGenerator>, EvaluatorError>
    {
        let exploration = RelaxedExploration::new(Arc::clone(&self.task));
        self.build_with(exploration, SimpleSuccessorGenerator::new())
    }

    /// Validates the configuration and builds an evaluator with custom
    /// exploration and successor-generation collaborators.
    pub fn build_with<X, G>(
        self,
        exploration: X,
        successor_generator: G,
    ) -> Result<LandmarkEvaluator<X, G>, EvaluatorError>
    where
        X: Exploration,
        G: SuccessorGenerator,
    {
        let cost_assignment = if self.config.admissible {
            if self.graph.has_reasonable_orderings() {
                return Err(EvaluatorError::ReasonableOrderings);
            }
            if self.task.has_axioms() {
                return Err(EvaluatorError::AxiomsUnsupported);
            }
            if self.task.has_conditional_effects()
                && !self.generator_supports_conditional_effects
            {
                return Err(EvaluatorError::ConditionalEffectsUnsupported);
            }
            match self.config.cost_partitioning {
                CostPartitioningMode::Uniform => Some(
                    self.cost_assignment
                        .unwrap_or_else(|| Box::new(UniformCostAssignment::new())),
                ),
                CostPartitioningMode::Optimal => Some(
                    self.cost_assignment
                        .ok_or(EvaluatorError::MissingCostAssignment)?,
                ),
            }
        } else {
            None
        };

        tracing::info!(
            landmarks = self.graph.len(),
            admissible = self.config.admissible,
            preferred_operators = self.config.preferred_operators,
            "initializing landmark heuristic"
        );

        let status_manager = LandmarkStatusManager::new(Arc::clone(&self.graph));
        Ok(LandmarkEvaluator {
            task: self.task,
            graph: self.graph,
            status_manager,
            cost_assignment,
            exploration,
            successor_generator,
            admissible: self.config.admissible,
            use_preferred_operators: self.config.preferred_operators,
            conditional_effects_supported: self.generator_supports_conditional_effects,
        })
    }
}

/// The landmark heuristic evaluator.
///
/// One instance serves one search; evaluations are strictly sequential.
/// See the module docs for the per-state control flow.
#[derive(Debug)]
pub struct LandmarkEvaluator<X = RelaxedExploration, G = SimpleSuccessorGenerator> {
    task: Arc<Task>,
    graph: Arc<LandmarkGraph>,
    status_manager: LandmarkStatusManager,
    cost_assignment: Option<Box<dyn CostAssignment>>,
    exploration: X,
    successor_generator: G,
    admissible: bool,
    use_preferred_operators: bool,
    conditional_effects_supported: bool,
}

impl<X: Exploration, G: SuccessorGenerator> LandmarkEvaluator<X, G> {
    pub fn task(&self) -> &Arc<Task> {
        &self.task
    }

    pub fn graph(&self) -> &Arc<LandmarkGraph> {
        &self.graph
    }

    /// Read access to the exploration collaborator, mainly so callers can
    /// observe that its result buffer is empty between evaluations.
    pub fn exploration(&self) -> &X {
        &self.exploration
    }

    /// The successor generator; shared with the search driver so both use
    /// the same notion of applicability.
    pub fn successor_generator(&self) -> &G {
        &self.successor_generator
    }

    /// Evaluates one state.
    ///
    /// Goal states short-circuit to 0: the counting formula may legally be
    /// nonzero at a goal when landmarks were achieved out of their natural
    /// order, so goals are decided by the explicit goal test, never by
    /// `h == 0`.
    pub fn evaluate(&mut self, state: &State) -> Evaluation {
        if self.task.is_goal_state(state) {
            return Evaluation::value(0);
        }

        let statuses = self.status_manager.update(state);
        if statuses.is_dead_end() {
            return Evaluation::dead_end();
        }

        let h = self.heuristic_value(&statuses);

        if !self.use_preferred_operators {
            return Evaluation::value(h);
        }
        match self.preferred_operators(state, &statuses) {
            Some(preferred) => Evaluation {
                estimate: Estimate::Value(h),
                preferred,
            },
            // The fallback exploration found no path to any landmark leaf:
            // a second, independent dead-end source that overrides the
            // scalar value.
            None => Evaluation::dead_end(),
        }
    }

    fn heuristic_value(&self, statuses: &LandmarkStatuses) -> u32 {
        match &self.cost_assignment {
            Some(strategy) => {
                let h_val = strategy.partitioned_value(&self.task, &self.graph, statuses);
                let h = (h_val - EPSILON).ceil();
                assert!(
                    h >= 0.0,
                    "cost partitioning produced a negative estimate ({h_val})"
                );
                h as u32
            }
            None => cost_totals(&self.graph, statuses).counting_value(),
        }
    }

    /// Two-tier helpful-action detection. Returns the preferred operators,
    /// or `None` when the fallback exploration proves the state dead.
    fn preferred_operators(
        &mut self,
        state: &State,
        statuses: &LandmarkStatuses,
    ) -> Option<Vec<OperatorId>> {
        let mut stage = if statuses.all_reached() {
            // Nothing left for the direct scan to aim at; plan toward
            // goal landmarks that need re-establishing.
            HelpfulStage::Exploration
        } else {
            HelpfulStage::DirectScan
        };
        loop {
            match stage {
                HelpfulStage::DirectScan => {
                    let preferred = self.direct_scan(state, statuses);
                    if !preferred.is_empty() {
                        return Some(preferred);
                    }
                    stage = HelpfulStage::Exploration;
                }
                HelpfulStage::Exploration => {
                    return self.explore_toward_leaves(state, statuses);
                }
            }
        }
    }

    /// Tier 1: operators whose effects directly achieve an interesting
    /// landmark. Simple landmarks strictly win over disjunctive ones.
    fn direct_scan(&self, state: &State, statuses: &LandmarkStatuses) -> Vec<OperatorId> {
        let mut simple: SmallVec<[OperatorId; 8]> = SmallVec::new();
        let mut disjunctive: SmallVec<[OperatorId; 8]> = SmallVec::new();

        for op_id in self
            .successor_generator
            .applicable_operators(&self.task, state)
        {
            let op = self.task.operator(op_id);
            for effect in op.effects() {
                // Effects with unsatisfied conditions do not fire and are
                // excluded before landmark resolution.
                if !effect.fires_in(state) {
                    continue;
                }
                if state.is_true(effect.fact()) {
                    continue;
                }
                let Some(lm) = self.graph.landmark_by_fact(effect.fact()) else {
                    continue;
                };
                if !landmark_is_interesting(&self.graph, state, statuses, lm) {
                    continue;
                }
                if self.graph.node(lm).is_disjunctive() {
                    disjunctive.push(op_id);
                } else {
                    simple.push(op_id);
                }
            }
        }

        let mut preferred = if simple.is_empty() { disjunctive } else { simple };
        preferred.sort_unstable();
        preferred.dedup();
        preferred.into_vec()
    }

    /// Tier 2: plan toward the landmark leaves (disjunctive landmarks
    /// eligible). Failure to find any plan proves the state dead.
    fn explore_toward_leaves(
        &mut self,
        state: &State,
        statuses: &LandmarkStatuses,
    ) -> Option<Vec<OperatorId>> {
        let leaves = collect_leaves(&self.graph, state, statuses, DisjunctiveLandmarks::Included);
        self.exploration.set_additional_goals(&leaves);

        let mut exploration = ClearOnExit::new(&mut self.exploration);
        if !exploration.find_plan_to_any(state) {
            tracing::debug!("no relaxed plan to any landmark leaf; reporting a dead end");
            return None;
        }
        Some(exploration.exported_ops().to_vec())
    }

    /// Must be called exactly once with the search's initial state before
    /// the first evaluation.
    pub fn notify_initial_state(&mut self, state: &State) {
        self.status_manager.initialize(state);
    }

    /// Records a state transition so the child's reached set derives from
    /// the parent's. Returns true iff a cached estimate for the child must
    /// be invalidated; recomputing whether the reached set actually changed
    /// could avoid some invalidations, but always invalidating is the safe
    /// default.
    pub fn notify_state_transition(
        &mut self,
        parent: &State,
        op: OperatorId,
        child: &State,
    ) -> bool {
        self.status_manager.notify_transition(parent, op, child);
        true
    }

    /// Whether dead-end verdicts from this evaluator are sound. Admissible
    /// estimates are sound by construction; the counting estimate is sound
    /// unless axioms or unsupported conditional effects are in play.
    pub fn dead_ends_are_reliable(&self) -> bool {
        if self.admissible {
            return true;
        }
        !self.task.has_axioms()
            && (!self.task.has_conditional_effects() || self.conditional_effects_supported)
    }
}

#[cfg(test)]
mod tests;
