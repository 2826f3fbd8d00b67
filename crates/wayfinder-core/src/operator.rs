//! Operators and their conditional effects.

use std::fmt;

use smallvec::SmallVec;

use crate::fact::Fact;
use crate::state::State;

/// Index of an operator within a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorId(pub usize);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// A single (possibly conditional) effect of an operator.
///
/// The effect sets `fact` in the successor state iff all of its
/// `conditions` hold in the predecessor state. Most effects are
/// unconditional, so the condition list is kept inline.
#[derive(Debug, Clone)]
pub struct Effect {
    conditions: SmallVec<[Fact; 2]>,
    fact: Fact,
}

impl Effect {
    pub fn new(fact: Fact) -> Self {
        Self {
            conditions: SmallVec::new(),
            fact,
        }
    }

    pub fn conditional(conditions: impl IntoIterator<Item = Fact>, fact: Fact) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            fact,
        }
    }

    pub fn conditions(&self) -> &[Fact] {
        &self.conditions
    }

    pub fn fact(&self) -> Fact {
        self.fact
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Returns true if this effect fires in `state`, i.e. all of its
    /// conditions hold there. Unconditional effects always fire.
    pub fn fires_in(&self, state: &State) -> bool {
        self.conditions.iter().all(|&cond| state.is_true(cond))
    }
}

/// A grounded planning operator.
#[derive(Debug, Clone)]
pub struct Operator {
    name: String,
    cost: u32,
    preconditions: Vec<Fact>,
    effects: Vec<Effect>,
}

impl Operator {
    pub fn new(
        name: impl Into<String>,
        cost: u32,
        preconditions: Vec<Fact>,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            preconditions,
            effects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn preconditions(&self) -> &[Fact] {
        &self.preconditions
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn has_conditional_effects(&self) -> bool {
        self.effects.iter().any(Effect::is_conditional)
    }

    /// Returns true if all preconditions hold in `state`.
    pub fn is_applicable(&self, state: &State) -> bool {
        self.preconditions.iter().all(|&pre| state.is_true(pre))
    }

    /// Applies this operator to `state`, firing every effect whose
    /// conditions hold in the predecessor.
    pub fn apply(&self, state: &State) -> State {
        let mut successor = state.clone();
        for effect in &self.effects {
            if effect.fires_in(state) {
                successor.set(effect.fact());
            }
        }
        successor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::VariableId;

    fn fact(var: usize, value: u16) -> Fact {
        Fact::new(VariableId(var), value)
    }

    #[test]
    fn applicability_checks_all_preconditions() {
        let op = Operator::new("op", 1, vec![fact(0, 1), fact(1, 1)], vec![]);
        assert!(op.is_applicable(&State::new(vec![1, 1])));
        assert!(!op.is_applicable(&State::new(vec![1, 0])));
    }

    #[test]
    fn conditional_effect_fires_only_when_condition_holds() {
        let effect = Effect::conditional([fact(0, 1)], fact(1, 1));
        assert!(effect.fires_in(&State::new(vec![1, 0])));
        assert!(!effect.fires_in(&State::new(vec![0, 0])));
    }

    #[test]
    fn apply_evaluates_conditions_against_the_predecessor() {
        // Both effects read v0's old value, so only the first fires.
        let op = Operator::new(
            "op",
            1,
            vec![],
            vec![
                Effect::conditional([fact(0, 0)], fact(0, 1)),
                Effect::conditional([fact(0, 1)], fact(1, 1)),
            ],
        );
        let successor = op.apply(&State::new(vec![0, 0]));
        assert_eq!(successor, State::new(vec![1, 0]));
    }
}
