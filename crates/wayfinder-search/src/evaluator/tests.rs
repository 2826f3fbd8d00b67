//! Tests for the landmark heuristic evaluator.

use std::sync::Arc;

use wayfinder_config::{CostPartitioningMode, HeuristicConfig};
use wayfinder_core::{Effect, Fact, State, TaskBuilder};
use wayfinder_landmarks::{LandmarkGraphBuilder, OrderType};
use wayfinder_test::{chain, disjunctive, fact, lapsed};

use super::*;
use crate::cost::UniformCostAssignment;
use crate::error::EvaluatorError;

fn evaluator_with(
    fixture: &wayfinder_test::Fixture,
    config: HeuristicConfig,
) -> LandmarkEvaluator {
    LandmarkEvaluatorBuilder::new(Arc::clone(&fixture.task), Arc::clone(&fixture.graph))
        .with_config(config)
        .build()
        .unwrap()
}

fn counting_config() -> HeuristicConfig {
    HeuristicConfig::default()
}

fn admissible_config() -> HeuristicConfig {
    HeuristicConfig {
        admissible: true,
        ..Default::default()
    }
}

fn preferred_config() -> HeuristicConfig {
    HeuristicConfig {
        preferred_operators: true,
        ..Default::default()
    }
}

#[test]
fn counting_estimate_on_the_initial_state() {
    let fixture = chain::chain();
    let mut evaluator = evaluator_with(&fixture, counting_config());
    evaluator.notify_initial_state(fixture.task.initial_state());

    let evaluation = evaluator.evaluate(fixture.task.initial_state());
    // No landmark reached yet: the full landmark cost remains.
    assert_eq!(evaluation.estimate, Estimate::Value(6));
    assert!(evaluation.preferred.is_empty());
}

#[test]
fn goal_state_short_circuits_to_zero() {
    let fixture = chain::chain();
    let mut evaluator = evaluator_with(&fixture, counting_config());

    // A goal state entered "out of order": only v0's landmark is counted
    // as reached, so the counting formula would be nonzero here. The
    // explicit goal test must win.
    let goal_state = State::new(vec![1, 1, 1]);
    evaluator.notify_initial_state(&goal_state);
    let evaluation = evaluator.evaluate(&goal_state);
    assert_eq!(evaluation.estimate, Estimate::Value(0));
}

#[test]
fn admissible_estimate_never_exceeds_the_optimal_cost() {
    let fixture = chain::chain();
    let mut evaluator = evaluator_with(&fixture, admissible_config());
    let task = Arc::clone(&fixture.task);
    evaluator.notify_initial_state(task.initial_state());

    // Walk the optimal plan; at every step the estimate must stay a lower
    // bound on the true remaining cost.
    let mut state = task.initial_state().clone();
    let mut remaining = chain::OPTIMAL_COST;
    for op_id in chain::OPERATORS {
        let evaluation = evaluator.evaluate(&state);
        let h = evaluation.estimate.value().expect("no dead end on the optimal plan");
        assert!(
            h <= remaining,
            "inadmissible estimate {h} with {remaining} remaining"
        );

        let child = task.operator(op_id).apply(&state);
        evaluator.notify_state_transition(&state, op_id, &child);
        remaining -= task.operator(op_id).cost();
        state = child;
    }
    assert_eq!(evaluator.evaluate(&state).estimate, Estimate::Value(0));
}

#[test]
fn admissible_estimate_is_exact_on_the_chain() {
    // Each chain landmark has a dedicated achiever, so uniform cost
    // partitioning loses nothing here.
    let fixture = chain::chain();
    let mut evaluator = evaluator_with(&fixture, admissible_config());
    evaluator.notify_initial_state(fixture.task.initial_state());

    let evaluation = evaluator.evaluate(fixture.task.initial_state());
    assert_eq!(evaluation.estimate, Estimate::Value(chain::OPTIMAL_COST));
}

#[test]
fn leaf_selection_skips_reached_and_order_blocked_landmarks() {
    let fixture = chain::chain();
    let initial = fixture.task.initial_state();

    // From the start only the first landmark is actionable: the later
    // ones have an unreached order-parent.
    let statuses = {
        let mut manager =
            wayfinder_landmarks::LandmarkStatusManager::new(Arc::clone(&fixture.graph));
        manager.initialize(initial);
        manager.update(initial)
    };
    let leaves = collect_leaves(
        &fixture.graph,
        initial,
        &statuses,
        DisjunctiveLandmarks::Included,
    );
    assert_eq!(leaves, vec![fact(0, 1)]);
}

#[test]
fn leaf_selection_can_exclude_disjunctive_landmarks() {
    let fixture = disjunctive::simple_and_disjunctive();
    let initial = fixture.task.initial_state();

    let statuses = {
        let mut manager =
            wayfinder_landmarks::LandmarkStatusManager::new(Arc::clone(&fixture.graph));
        manager.initialize(initial);
        manager.update(initial)
    };

    let all = collect_leaves(
        &fixture.graph,
        initial,
        &statuses,
        DisjunctiveLandmarks::Included,
    );
    assert_eq!(all, vec![fact(0, 1), fact(1, 1), fact(2, 1)]);

    let simple_only = collect_leaves(
        &fixture.graph,
        initial,
        &statuses,
        DisjunctiveLandmarks::Excluded,
    );
    assert_eq!(simple_only, vec![fact(0, 1)]);
}

#[test]
fn direct_scan_prefers_simple_landmarks_over_disjunctive_ones() {
    let fixture = disjunctive::simple_and_disjunctive();
    let mut evaluator = evaluator_with(&fixture, preferred_config());
    let task = Arc::clone(&fixture.task);
    evaluator.notify_initial_state(task.initial_state());

    // set-a achieves the simple landmark, set-b/set-c only the disjunctive
    // one; all are applicable and interesting, but only the simple bucket
    // is marked preferred.
    let evaluation = evaluator.evaluate(task.initial_state());
    assert_eq!(evaluation.preferred, vec![disjunctive::SET_A]);
}

#[test]
fn disjunctive_bucket_is_used_once_no_simple_landmark_is_achievable() {
    let fixture = disjunctive::simple_and_disjunctive();
    let mut evaluator = evaluator_with(&fixture, preferred_config());
    let task = Arc::clone(&fixture.task);

    // After set-a the simple landmark is reached; only the disjunctive
    // landmark is left for the scan.
    let s0 = task.initial_state().clone();
    evaluator.notify_initial_state(&s0);
    let s1 = task.operator(disjunctive::SET_A).apply(&s0);
    evaluator.notify_state_transition(&s0, disjunctive::SET_A, &s1);

    let evaluation = evaluator.evaluate(&s1);
    assert_eq!(
        evaluation.preferred,
        vec![disjunctive::SET_B, disjunctive::SET_C]
    );
}

#[test]
fn lapsed_goal_landmark_drives_the_exploration_fallback() {
    let fixture = lapsed::lapsed_goal();
    let mut evaluator = evaluator_with(&fixture, preferred_config());
    let task = Arc::clone(&fixture.task);

    let s0 = task.initial_state().clone();
    evaluator.notify_initial_state(&s0);
    let s1 = task.operator(lapsed::PRESS).apply(&s0);
    evaluator.notify_state_transition(&s0, lapsed::PRESS, &s1);
    let s2 = task.operator(lapsed::TRADE).apply(&s1);
    evaluator.notify_state_transition(&s1, lapsed::TRADE, &s2);

    // All landmarks reached, but the switch landmark lapsed: the leaf set
    // is exactly its fact, and the exploration proposes pressing again.
    let statuses = {
        let mut manager =
            wayfinder_landmarks::LandmarkStatusManager::new(Arc::clone(&fixture.graph));
        manager.initialize(&s0);
        manager.notify_transition(&s0, lapsed::PRESS, &s1);
        manager.notify_transition(&s1, lapsed::TRADE, &s2);
        manager.update(&s2)
    };
    assert!(statuses.all_reached());
    let leaves = collect_leaves(&fixture.graph, &s2, &statuses, DisjunctiveLandmarks::Included);
    assert_eq!(leaves, vec![fact(0, 1)]);

    let evaluation = evaluator.evaluate(&s2);
    assert_eq!(evaluation.preferred, vec![lapsed::PRESS]);
    assert!(!evaluation.estimate.is_dead_end());
    // The exploration buffer must not leak into the next evaluation.
    assert!(evaluator.exploration().exported_ops().is_empty());
}

#[test]
fn failed_exploration_downgrades_the_state_to_a_dead_end() {
    // The landmark's recorded achiever needs v0=1, which nothing provides:
    // structurally fine, but no relaxed plan can exist.
    let mut tb = TaskBuilder::new();
    let v0 = tb.add_variable("v0", 2);
    let v1 = tb.add_variable("v1", 2);
    let gated = tb.add_operator(
        "gated",
        1,
        vec![Fact::new(v0, 1)],
        vec![Effect::new(Fact::new(v1, 1))],
    );
    tb.add_goal(Fact::new(v1, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm = gb.add_simple(Fact::new(v1, 1));
    gb.mark_goal(lm);
    gb.add_first_achiever(lm, gated);
    let graph = Arc::new(gb.build().unwrap());

    let mut evaluator = LandmarkEvaluatorBuilder::new(Arc::clone(&task), graph)
        .with_config(preferred_config())
        .build()
        .unwrap();
    evaluator.notify_initial_state(task.initial_state());

    let evaluation = evaluator.evaluate(task.initial_state());
    assert_eq!(evaluation.estimate, Estimate::DeadEnd);
    assert!(evaluation.preferred.is_empty());
    // Cleared on the failure path as well.
    assert!(evaluator.exploration().exported_ops().is_empty());
}

#[test]
fn conditional_effects_with_unsatisfied_conditions_are_not_helpful() {
    // The operator could achieve the landmark, but only under a condition
    // that does not hold (and is unreachable), so neither tier offers it.
    let mut tb = TaskBuilder::new();
    let a = tb.add_variable("a", 2);
    let b = tb.add_variable("b", 2);
    let cond_op = tb.add_operator(
        "cond-op",
        1,
        vec![],
        vec![Effect::conditional([Fact::new(a, 1)], Fact::new(b, 1))],
    );
    tb.add_goal(Fact::new(b, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm = gb.add_simple(Fact::new(b, 1));
    gb.mark_goal(lm);
    gb.add_first_achiever(lm, cond_op);
    let graph = Arc::new(gb.build().unwrap());

    let mut evaluator = LandmarkEvaluatorBuilder::new(Arc::clone(&task), graph)
        .with_config(preferred_config())
        .build()
        .unwrap();
    evaluator.notify_initial_state(task.initial_state());

    // Tier 1 must skip the non-firing effect; tier 2 cannot reach the
    // landmark either, so the state is reported dead.
    let evaluation = evaluator.evaluate(task.initial_state());
    assert_eq!(evaluation.estimate, Estimate::DeadEnd);
}

#[test]
fn preferred_operators_are_skipped_when_disabled() {
    let fixture = disjunctive::simple_and_disjunctive();
    let mut evaluator = evaluator_with(&fixture, counting_config());
    evaluator.notify_initial_state(fixture.task.initial_state());

    let evaluation = evaluator.evaluate(fixture.task.initial_state());
    assert!(evaluation.preferred.is_empty());
    assert!(!evaluation.estimate.is_dead_end());
}

#[test]
fn structural_dead_end_short_circuits_the_evaluation() {
    // A landmark with no achievers at all cannot ever be reached.
    let mut tb = TaskBuilder::new();
    let v = tb.add_variable("v", 2);
    tb.add_goal(Fact::new(v, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm = gb.add_simple(Fact::new(v, 1));
    gb.mark_goal(lm);
    let graph = Arc::new(gb.build().unwrap());

    let mut evaluator = LandmarkEvaluatorBuilder::new(Arc::clone(&task), graph)
        .with_config(preferred_config())
        .build()
        .unwrap();
    evaluator.notify_initial_state(task.initial_state());

    let evaluation = evaluator.evaluate(task.initial_state());
    assert_eq!(evaluation.estimate, Estimate::DeadEnd);
    assert!(evaluator.exploration().exported_ops().is_empty());
}

#[test]
fn admissible_mode_rejects_reasonable_orderings() {
    let fixture = chain::chain();
    let mut gb = LandmarkGraphBuilder::new();
    let a = gb.add_simple(fact(0, 1));
    let b = gb.add_simple(fact(1, 1));
    gb.add_ordering(a, b, OrderType::Reasonable).unwrap();
    let graph = Arc::new(gb.build().unwrap());

    let err = LandmarkEvaluatorBuilder::new(Arc::clone(&fixture.task), graph)
        .with_config(admissible_config())
        .build()
        .unwrap_err();
    assert_eq!(err, EvaluatorError::ReasonableOrderings);
}

#[test]
fn admissible_mode_rejects_axioms() {
    let mut tb = TaskBuilder::new();
    let v = tb.add_variable("v", 2);
    tb.add_goal(Fact::new(v, 1));
    tb.mark_axioms();
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    gb.add_simple(Fact::new(v, 1));
    let graph = Arc::new(gb.build().unwrap());

    let err = LandmarkEvaluatorBuilder::new(task, graph)
        .with_config(admissible_config())
        .build()
        .unwrap_err();
    assert_eq!(err, EvaluatorError::AxiomsUnsupported);
}

#[test]
fn admissible_mode_rejects_unsupported_conditional_effects() {
    let mut tb = TaskBuilder::new();
    let v = tb.add_variable("v", 2);
    tb.add_operator(
        "cond",
        1,
        vec![],
        vec![Effect::conditional([Fact::new(v, 0)], Fact::new(v, 1))],
    );
    tb.add_goal(Fact::new(v, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    gb.add_simple(Fact::new(v, 1));
    let graph = Arc::new(gb.build().unwrap());

    let err = LandmarkEvaluatorBuilder::new(Arc::clone(&task), Arc::clone(&graph))
        .with_config(admissible_config())
        .build()
        .unwrap_err();
    assert_eq!(err, EvaluatorError::ConditionalEffectsUnsupported);

    // The same task is fine once the generation method declares support.
    assert!(LandmarkEvaluatorBuilder::new(task, graph)
        .with_config(admissible_config())
        .generator_supports_conditional_effects(true)
        .build()
        .is_ok());
}

#[test]
fn optimal_mode_requires_a_supplied_strategy() {
    let fixture = chain::chain();
    let optimal = HeuristicConfig {
        admissible: true,
        cost_partitioning: CostPartitioningMode::Optimal,
        ..Default::default()
    };

    let err = LandmarkEvaluatorBuilder::new(
        Arc::clone(&fixture.task),
        Arc::clone(&fixture.graph),
    )
    .with_config(optimal.clone())
    .build()
    .unwrap_err();
    assert_eq!(err, EvaluatorError::MissingCostAssignment);

    assert!(LandmarkEvaluatorBuilder::new(
        Arc::clone(&fixture.task),
        Arc::clone(&fixture.graph),
    )
    .with_config(optimal)
    .with_cost_assignment(Box::new(UniformCostAssignment::new()))
    .build()
    .is_ok());
}

#[test]
fn inadmissible_mode_tolerates_axioms_and_conditional_effects() {
    let mut tb = TaskBuilder::new();
    let v = tb.add_variable("v", 2);
    tb.add_operator(
        "cond",
        1,
        vec![],
        vec![Effect::conditional([Fact::new(v, 0)], Fact::new(v, 1))],
    );
    tb.add_goal(Fact::new(v, 1));
    tb.mark_axioms();
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    gb.add_simple(Fact::new(v, 1));
    let graph = Arc::new(gb.build().unwrap());

    let evaluator = LandmarkEvaluatorBuilder::new(task, graph)
        .with_config(counting_config())
        .build()
        .unwrap();
    // ...but its dead-end verdicts are no longer reliable.
    assert!(!evaluator.dead_ends_are_reliable());
}

#[test]
fn dead_end_reliability_mirrors_the_admissibility_preconditions() {
    let fixture = chain::chain();
    let admissible = evaluator_with(&fixture, admissible_config());
    assert!(admissible.dead_ends_are_reliable());

    let counting = evaluator_with(&fixture, counting_config());
    // No axioms, no conditional effects: reliable even without
    // admissibility.
    assert!(counting.dead_ends_are_reliable());
}
