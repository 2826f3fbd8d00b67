//! A task whose goal landmark must be achieved twice.

use std::sync::Arc;

use wayfinder_core::{Effect, Fact, OperatorId, TaskBuilder};
use wayfinder_landmarks::LandmarkGraphBuilder;

use crate::Fixture;

/// The known optimal plan cost of [`lapsed_goal`]: `press, trade, press`.
pub const OPTIMAL_COST: u32 = 3;

pub const PRESS: OperatorId = OperatorId(0);
pub const TRADE: OperatorId = OperatorId(1);

/// Two binary variables: a switch `g` and a payload `p`; the goal needs
/// both at 1. `press` sets `g=1`; `trade` consumes `g` (resetting it to 0)
/// to set `p=1`. Every plan must press the switch, trade it away and press
/// it again.
///
/// Both `(g,1)` and `(p,1)` are goal landmarks. After `press, trade` every
/// landmark has been reached once, yet `(g,1)` is false again: the state
/// where helpful actions can only come from planning toward the lapsed
/// goal landmark.
pub fn lapsed_goal() -> Fixture {
    let mut tb = TaskBuilder::new();
    let g = tb.add_variable("g", 2);
    let p = tb.add_variable("p", 2);
    let press = tb.add_operator("press", 1, vec![], vec![Effect::new(Fact::new(g, 1))]);
    let trade = tb.add_operator(
        "trade",
        1,
        vec![Fact::new(g, 1)],
        vec![
            Effect::new(Fact::new(p, 1)),
            Effect::new(Fact::new(g, 0)),
        ],
    );
    tb.add_goal(Fact::new(g, 1));
    tb.add_goal(Fact::new(p, 1));
    let task = Arc::new(tb.build().unwrap());

    let mut gb = LandmarkGraphBuilder::new();
    let lm_g = gb.add_simple(Fact::new(g, 1));
    let lm_p = gb.add_simple(Fact::new(p, 1));
    gb.mark_goal(lm_g).mark_goal(lm_p);
    gb.add_first_achiever(lm_g, press);
    gb.add_first_achiever(lm_p, trade);
    let graph = Arc::new(gb.build().unwrap());

    Fixture { task, graph }
}
