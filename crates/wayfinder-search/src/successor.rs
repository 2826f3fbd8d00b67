//! Applicable-operator enumeration.

use std::fmt::Debug;

use wayfinder_core::{OperatorId, State, Task};

/// Enumerates the operators applicable in a state.
///
/// The evaluator only uses this for the direct helpful-action scan; search
/// drivers use it for expansion. Implementations may index preconditions
/// however they like, as long as every applicable operator is reported.
pub trait SuccessorGenerator: Send + Debug {
    fn applicable_operators(&self, task: &Task, state: &State) -> Vec<OperatorId>;
}

/// A generator that checks every operator's preconditions in turn.
///
/// Linear in the operator count, which is fine for the task sizes the
/// tests and examples work with; swap in an indexed generator for large
/// grounded tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSuccessorGenerator;

impl SimpleSuccessorGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SuccessorGenerator for SimpleSuccessorGenerator {
    fn applicable_operators(&self, task: &Task, state: &State) -> Vec<OperatorId> {
        task.operator_ids()
            .filter(|&id| task.operator(id).is_applicable(state))
            .collect()
    }
}
