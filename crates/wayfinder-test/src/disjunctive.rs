//! A task with a simple and a disjunctive landmark side by side.

use std::sync::Arc;

use wayfinder_core::{Effect, Fact, OperatorId, TaskBuilder};
use wayfinder_landmarks::LandmarkGraphBuilder;

use crate::Fixture;

pub const SET_A: OperatorId = OperatorId(0);
pub const SET_B: OperatorId = OperatorId(1);
pub const SET_C: OperatorId = OperatorId(2);

/// Three binary variables `a`, `b`, `c`; the goal needs `a=1` and `b=1`.
/// All three setters are applicable from the start.
///
/// `(a,1)` is a simple landmark; `{(b,1), (c,1)}` is a disjunctive
/// landmark achieved by either setter. From the initial state both
/// landmarks are interesting, so a direct scan sees helpful actions for
/// both kinds at once.
pub fn simple_and_disjunctive() -> Fixture {
    let mut tb = TaskBuilder::new();
    let a = tb.add_variable("a", 2);
    let b = tb.add_variable("b", 2);
    let c = tb.add_variable("c", 2);
    let set_a = tb.add_operator("set-a", 1, vec![], vec![Effect::new(Fact::new(a, 1))]);
    let set_b = tb.add_operator("set-b", 1, vec![], vec![Effect::new(Fact::new(b, 1))]);
    let set_c = tb.add_operator("set-c", 1, vec![], vec![Effect::new(Fact::new(c, 1))]);
    tb.add_goal(Fact::new(a, 1));
    tb.add_goal(Fact::new(b, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm_a = gb.add_simple(Fact::new(a, 1));
    let lm_bc = gb.add_disjunctive([Fact::new(b, 1), Fact::new(c, 1)]);
    gb.mark_goal(lm_a);
    gb.add_first_achiever(lm_a, set_a);
    gb.add_first_achiever(lm_bc, set_b);
    gb.add_first_achiever(lm_bc, set_c);
    let graph = Arc::new(gb.build().unwrap());

    Fixture { task, graph }
}
