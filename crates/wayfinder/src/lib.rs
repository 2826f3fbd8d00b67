//! Wayfinder - Landmark-based heuristic planning in Rust
//!
//! Build a task and a landmark graph, then let the evaluator estimate
//! remaining cost, prove dead ends and propose preferred operators for a
//! forward search.
//!
//! # Example
//!
//! ```rust
//! use wayfinder::prelude::*;
//! use std::sync::Arc;
//!
//! let mut tb = TaskBuilder::new();
//! let v = tb.add_variable("door-open", 2);
//! let open = tb.add_operator("open", 1, vec![], vec![Effect::new(Fact::new(v, 1))]);
//! tb.add_goal(Fact::new(v, 1));
//! let task = Arc::new(tb.build().unwrap());
//!
//! let mut gb = LandmarkGraphBuilder::new();
//! let lm = gb.add_simple(Fact::new(v, 1));
//! gb.mark_goal(lm);
//! gb.add_first_achiever(lm, open);
//! let graph = Arc::new(gb.build().unwrap());
//!
//! let evaluator = LandmarkEvaluatorBuilder::new(Arc::clone(&task), graph)
//!     .build()
//!     .unwrap();
//! let mut search = GreedySearch::new(evaluator, SearchConfig::default());
//! let SearchOutcome::Plan(plan) = search.run() else { panic!("solvable") };
//! assert_eq!(plan.cost, 1);
//! ```

// Task model
pub use wayfinder_core::{
    Effect, Fact, Operator, OperatorId, Result, State, Task, TaskBuilder, Variable, VariableId,
    WayfinderError,
};

// Landmark layer
pub use wayfinder_landmarks::{
    active_landmarks, cost_totals, CostTotals, LandmarkBitset, LandmarkGraph,
    LandmarkGraphBuilder, LandmarkId, LandmarkNode, LandmarkStatus, LandmarkStatusManager,
    LandmarkStatuses, OrderType,
};

// Evaluator and driver
pub use wayfinder_search::{
    collect_leaves, landmark_is_interesting, CostAssignment, DisjunctiveLandmarks, Estimate,
    Evaluation, EvaluatorError, Exploration, GreedySearch, LandmarkEvaluator,
    LandmarkEvaluatorBuilder, Plan, RelaxedExploration, SearchOutcome, SimpleSuccessorGenerator,
    SuccessorGenerator, UniformCostAssignment,
};

// Configuration
pub use wayfinder_config::{
    ConfigError, CostPartitioningMode, HeuristicConfig, SearchConfig, WayfinderConfig,
};

pub mod prelude {
    pub use wayfinder_config::{HeuristicConfig, SearchConfig, WayfinderConfig};
    pub use wayfinder_core::{Effect, Fact, State, TaskBuilder};
    pub use wayfinder_landmarks::{LandmarkGraphBuilder, OrderType};
    pub use wayfinder_search::{
        Estimate, GreedySearch, LandmarkEvaluatorBuilder, SearchOutcome,
    };
}
