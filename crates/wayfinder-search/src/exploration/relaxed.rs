//! Delete-relaxation plan finding.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use wayfinder_core::{Fact, OperatorId, State, Task, VariableId};

use super::Exploration;

/// A relaxed exploration: forward reachability under the delete relaxation
/// (achieved facts stay achieved), with plan extraction through best
/// supporters.
///
/// The fixpoint stops as soon as any additional goal fact becomes
/// reachable, so runs are bounded by the grounded operator set and always
/// terminate.
#[derive(Debug)]
pub struct RelaxedExploration {
    task: Arc<Task>,
    additional_goals: Vec<Fact>,
    exported_ops: Vec<OperatorId>,
}

impl RelaxedExploration {
    pub fn new(task: Arc<Task>) -> Self {
        Self {
            task,
            additional_goals: Vec::new(),
            exported_ops: Vec::new(),
        }
    }

    fn extract_plan(&mut self, goal: Fact, supporter: &HashMap<Fact, OperatorId>) {
        let mut visited = HashSet::new();
        let mut emitted = HashSet::new();
        backchain(
            &self.task,
            goal,
            supporter,
            &mut visited,
            &mut emitted,
            &mut self.exported_ops,
        );
    }
}

/// Emits the supporting operators for `fact` in dependency order:
/// supporters of a fact's prerequisites come before the supporter of the
/// fact itself. Facts without a supporter were true in the start state.
fn backchain(
    task: &Task,
    fact: Fact,
    supporter: &HashMap<Fact, OperatorId>,
    visited: &mut HashSet<Fact>,
    emitted: &mut HashSet<OperatorId>,
    plan: &mut Vec<OperatorId>,
) {
    if !visited.insert(fact) {
        return;
    }
    let Some(&op_id) = supporter.get(&fact) else {
        return;
    };
    let op = task.operator(op_id);
    for &pre in op.preconditions() {
        backchain(task, pre, supporter, visited, emitted, plan);
    }
    for effect in op.effects() {
        if effect.fact() == fact {
            for &cond in effect.conditions() {
                backchain(task, cond, supporter, visited, emitted, plan);
            }
        }
    }
    if emitted.insert(op_id) {
        plan.push(op_id);
    }
}

impl Exploration for RelaxedExploration {
    fn set_additional_goals(&mut self, goals: &[Fact]) {
        self.additional_goals.clear();
        self.additional_goals.extend_from_slice(goals);
    }

    fn find_plan_to_any(&mut self, state: &State) -> bool {
        if self.additional_goals.is_empty() {
            tracing::debug!("relaxed exploration with an empty goal set; nothing to reach");
            return false;
        }

        let mut reached: HashSet<Fact> = (0..state.num_variables())
            .map(VariableId)
            .map(|var| Fact::new(var, state.value(var)))
            .collect();
        if let Some(&goal) = self
            .additional_goals
            .iter()
            .find(|&&goal| reached.contains(&goal))
        {
            // Already true in the start state: the empty plan suffices.
            tracing::trace!(%goal, "additional goal already holds");
            return true;
        }

        let mut supporter: HashMap<Fact, OperatorId> = HashMap::new();
        let task = Arc::clone(&self.task);
        loop {
            let mut changed = false;
            for op_id in task.operator_ids() {
                let op = task.operator(op_id);
                if !op.preconditions().iter().all(|pre| reached.contains(pre)) {
                    continue;
                }
                for effect in op.effects() {
                    if !effect.conditions().iter().all(|cond| reached.contains(cond)) {
                        continue;
                    }
                    let fact = effect.fact();
                    if reached.insert(fact) {
                        supporter.insert(fact, op_id);
                        changed = true;
                        if self.additional_goals.contains(&fact) {
                            self.extract_plan(fact, &supporter);
                            tracing::debug!(
                                ops = self.exported_ops.len(),
                                "relaxed exploration found a plan to a landmark leaf"
                            );
                            return true;
                        }
                    }
                }
            }
            if !changed {
                tracing::debug!("relaxed exploration exhausted without reaching a leaf");
                return false;
            }
        }
    }

    fn exported_ops(&self) -> &[OperatorId] {
        &self.exported_ops
    }

    fn clear_exported_ops(&mut self) {
        self.exported_ops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::{Effect, TaskBuilder, VariableId};

    fn fact(var: usize, value: u16) -> Fact {
        Fact::new(VariableId(var), value)
    }

    /// v0 -> v1 -> v2, one operator per step.
    fn chain_task() -> Arc<Task> {
        let mut builder = TaskBuilder::new();
        let v0 = builder.add_variable("v0", 2);
        let v1 = builder.add_variable("v1", 2);
        let v2 = builder.add_variable("v2", 2);
        builder.add_operator("o0", 1, vec![], vec![Effect::new(Fact::new(v0, 1))]);
        builder.add_operator(
            "o1",
            1,
            vec![Fact::new(v0, 1)],
            vec![Effect::new(Fact::new(v1, 1))],
        );
        builder.add_operator(
            "o2",
            1,
            vec![Fact::new(v1, 1)],
            vec![Effect::new(Fact::new(v2, 1))],
        );
        Arc::new(builder.build().unwrap())
    }

    #[test]
    fn plan_is_emitted_in_dependency_order() {
        let task = chain_task();
        let mut exploration = RelaxedExploration::new(Arc::clone(&task));
        exploration.set_additional_goals(&[fact(2, 1)]);

        assert!(exploration.find_plan_to_any(task.initial_state()));
        assert_eq!(
            exploration.exported_ops(),
            &[OperatorId(0), OperatorId(1), OperatorId(2)]
        );
    }

    #[test]
    fn unreachable_goal_reports_failure() {
        let mut builder = TaskBuilder::new();
        let v0 = builder.add_variable("v0", 2);
        let v1 = builder.add_variable("v1", 2);
        // Achieving v1=1 needs v0=1, which nothing provides.
        builder.add_operator(
            "gated",
            1,
            vec![Fact::new(v0, 1)],
            vec![Effect::new(Fact::new(v1, 1))],
        );
        let task = Arc::new(builder.build().unwrap());

        let mut exploration = RelaxedExploration::new(Arc::clone(&task));
        exploration.set_additional_goals(&[fact(1, 1)]);
        assert!(!exploration.find_plan_to_any(task.initial_state()));
        assert!(exploration.exported_ops().is_empty());
    }

    #[test]
    fn empty_goal_set_is_unreachable() {
        let task = chain_task();
        let mut exploration = RelaxedExploration::new(Arc::clone(&task));
        exploration.set_additional_goals(&[]);
        assert!(!exploration.find_plan_to_any(task.initial_state()));
    }

    #[test]
    fn disjunctive_goal_takes_the_first_alternative_reached() {
        let task = chain_task();
        let mut exploration = RelaxedExploration::new(Arc::clone(&task));
        exploration.set_additional_goals(&[fact(2, 1), fact(0, 1)]);

        assert!(exploration.find_plan_to_any(task.initial_state()));
        // Reaching v0=1 needs only the first operator.
        assert_eq!(exploration.exported_ops(), &[OperatorId(0)]);
    }

    #[test]
    fn goal_already_true_yields_the_empty_plan() {
        let task = chain_task();
        let mut exploration = RelaxedExploration::new(task);
        exploration.set_additional_goals(&[fact(0, 0)]);
        assert!(exploration.find_plan_to_any(&State::new(vec![0, 0, 0])));
        assert!(exploration.exported_ops().is_empty());
    }

    #[test]
    fn conditional_effects_fire_once_their_condition_is_reachable() {
        let mut builder = TaskBuilder::new();
        let v0 = builder.add_variable("v0", 2);
        let v1 = builder.add_variable("v1", 2);
        builder.add_operator("enable", 1, vec![], vec![Effect::new(Fact::new(v0, 1))]);
        builder.add_operator(
            "conditional",
            1,
            vec![],
            vec![Effect::conditional(
                [Fact::new(v0, 1)],
                Fact::new(v1, 1),
            )],
        );
        let task = Arc::new(builder.build().unwrap());

        let mut exploration = RelaxedExploration::new(Arc::clone(&task));
        exploration.set_additional_goals(&[fact(1, 1)]);
        assert!(exploration.find_plan_to_any(task.initial_state()));
        assert_eq!(
            exploration.exported_ops(),
            &[OperatorId(0), OperatorId(1)]
        );
    }
}
