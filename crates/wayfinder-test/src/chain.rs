//! A linear chain task: three facts achieved strictly in order.

use std::sync::Arc;

use wayfinder_core::{Effect, Fact, OperatorId, TaskBuilder};
use wayfinder_landmarks::{LandmarkGraphBuilder, LandmarkId, OrderType};

use crate::Fixture;

/// The known optimal plan cost of [`chain`]: apply all three operators.
pub const OPTIMAL_COST: u32 = 6;

/// Landmark ids of the chain fixture, in achievement order.
pub const LANDMARKS: [LandmarkId; 3] = [LandmarkId(0), LandmarkId(1), LandmarkId(2)];

/// Operator ids of the chain fixture, in application order.
pub const OPERATORS: [OperatorId; 3] = [OperatorId(0), OperatorId(1), OperatorId(2)];

/// Three binary variables `v0..v2`; `oN` sets `vN=1` and requires its
/// predecessor. The goal is `v2=1`; the only plan is `o0, o1, o2` with
/// costs 1, 2, 3.
///
/// The landmark graph mirrors the chain: `(v0,1) -> (v1,1) -> (v2,1)` with
/// natural orderings, `(v2,1)` marked as the goal landmark and each
/// landmark's cost set to its only achiever's cost.
pub fn chain() -> Fixture {
    let mut tb = TaskBuilder::new();
    let v0 = tb.add_variable("v0", 2);
    let v1 = tb.add_variable("v1", 2);
    let v2 = tb.add_variable("v2", 2);
    let o0 = tb.add_operator("o0", 1, vec![], vec![Effect::new(Fact::new(v0, 1))]);
    let o1 = tb.add_operator(
        "o1",
        2,
        vec![Fact::new(v0, 1)],
        vec![Effect::new(Fact::new(v1, 1))],
    );
    let o2 = tb.add_operator(
        "o2",
        3,
        vec![Fact::new(v1, 1)],
        vec![Effect::new(Fact::new(v2, 1))],
    );
    tb.add_goal(Fact::new(v2, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm0 = gb.add_simple(Fact::new(v0, 1));
    let lm1 = gb.add_simple(Fact::new(v1, 1));
    let lm2 = gb.add_simple(Fact::new(v2, 1));
    gb.mark_goal(lm2);
    gb.add_ordering(lm0, lm1, OrderType::Natural).unwrap();
    gb.add_ordering(lm1, lm2, OrderType::Natural).unwrap();
    gb.set_cost(lm0, 1).set_cost(lm1, 2).set_cost(lm2, 3);
    gb.add_first_achiever(lm0, o0);
    gb.add_first_achiever(lm1, o1);
    gb.add_first_achiever(lm2, o2);
    let graph = Arc::new(gb.build().unwrap());

    Fixture { task, graph }
}
