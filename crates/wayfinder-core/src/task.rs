//! The planning task: variables, operators, initial state and goal.

use crate::error::{Result, WayfinderError};
use crate::fact::{Fact, Variable, VariableId};
use crate::operator::{Effect, Operator, OperatorId};
use crate::state::State;

/// A grounded planning task in multi-valued (SAS+-style) representation.
///
/// Tasks are immutable once built; assemble them with [`TaskBuilder`].
///
/// # Example
///
/// ```
/// use wayfinder_core::{Effect, Fact, TaskBuilder};
///
/// let mut builder = TaskBuilder::new();
/// let door = builder.add_variable("door-open", 2);
/// let open = builder.add_operator("open", 1, vec![], vec![Effect::new(Fact::new(door, 1))]);
/// builder.add_goal(Fact::new(door, 1));
/// let task = builder.build().unwrap();
///
/// assert!(!task.is_goal_state(task.initial_state()));
/// let opened = task.operator(open).apply(task.initial_state());
/// assert!(task.is_goal_state(&opened));
/// ```
#[derive(Debug)]
pub struct Task {
    variables: Vec<Variable>,
    operators: Vec<Operator>,
    initial_state: State,
    goal: Vec<Fact>,
    has_axioms: bool,
    has_conditional_effects: bool,
}

impl Task {
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns the operator with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this task.
    pub fn operator(&self, id: OperatorId) -> &Operator {
        &self.operators[id.0]
    }

    pub fn operator_ids(&self) -> impl Iterator<Item = OperatorId> + '_ {
        (0..self.operators.len()).map(OperatorId)
    }

    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn goal(&self) -> &[Fact] {
        &self.goal
    }

    /// Returns true if every goal fact holds in `state`.
    pub fn is_goal_state(&self, state: &State) -> bool {
        self.goal.iter().all(|&fact| state.is_true(fact))
    }

    /// True if the task uses derived predicates (axioms).
    pub fn has_axioms(&self) -> bool {
        self.has_axioms
    }

    /// True if any operator carries a conditional effect.
    pub fn has_conditional_effects(&self) -> bool {
        self.has_conditional_effects
    }
}

/// Builder for [`Task`].
#[derive(Debug, Default)]
pub struct TaskBuilder {
    variables: Vec<Variable>,
    operators: Vec<Operator>,
    initial_values: Vec<u16>,
    goal: Vec<Fact>,
    has_axioms: bool,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state variable; its initial value defaults to 0.
    pub fn add_variable(&mut self, name: impl Into<String>, domain_size: u16) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(name, domain_size));
        self.initial_values.push(0);
        id
    }

    /// Sets the initial value of a variable.
    pub fn set_initial_value(&mut self, var: VariableId, value: u16) -> &mut Self {
        self.initial_values[var.0] = value;
        self
    }

    pub fn add_operator(
        &mut self,
        name: impl Into<String>,
        cost: u32,
        preconditions: Vec<Fact>,
        effects: Vec<Effect>,
    ) -> OperatorId {
        let id = OperatorId(self.operators.len());
        self.operators
            .push(Operator::new(name, cost, preconditions, effects));
        id
    }

    pub fn add_goal(&mut self, fact: Fact) -> &mut Self {
        self.goal.push(fact);
        self
    }

    /// Marks the task as containing derived predicates.
    pub fn mark_axioms(&mut self) -> &mut Self {
        self.has_axioms = true;
        self
    }

    /// Validates and builds the task.
    pub fn build(self) -> Result<Task> {
        let num_variables = self.variables.len();
        let check_fact = |fact: Fact, context: &str| -> Result<()> {
            if fact.var.0 >= num_variables {
                return Err(WayfinderError::TaskModel(format!(
                    "{context} references unknown variable {}",
                    fact.var
                )));
            }
            if fact.value >= self.variables[fact.var.0].domain_size() {
                return Err(WayfinderError::TaskModel(format!(
                    "{context} references value {} outside the domain of {}",
                    fact.value, fact.var
                )));
            }
            Ok(())
        };

        for fact in &self.goal {
            check_fact(*fact, "goal")?;
        }
        for op in &self.operators {
            for fact in op.preconditions() {
                check_fact(*fact, op.name())?;
            }
            for effect in op.effects() {
                check_fact(effect.fact(), op.name())?;
                for cond in effect.conditions() {
                    check_fact(*cond, op.name())?;
                }
            }
        }
        for (var, &value) in self.variables.iter().zip(&self.initial_values) {
            if value >= var.domain_size() {
                return Err(WayfinderError::TaskModel(format!(
                    "initial value {value} outside the domain of {}",
                    var.name()
                )));
            }
        }

        let has_conditional_effects = self
            .operators
            .iter()
            .any(Operator::has_conditional_effects);
        Ok(Task {
            variables: self.variables,
            operators: self.operators,
            initial_state: State::new(self.initial_values),
            goal: self.goal,
            has_axioms: self.has_axioms,
            has_conditional_effects,
        })
    }
}
