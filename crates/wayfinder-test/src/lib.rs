//! Shared test fixtures for Wayfinder crates.
//!
//! This crate provides small synthetic tasks together with hand-built
//! landmark graphs, so evaluator and driver tests can work against known
//! optimal costs instead of mined landmarks.
//!
//! - [`chain`] - a linear chain of landmarks with known optimal cost
//! - [`lapsed`] - a goal landmark that must be achieved twice
//! - [`disjunctive`] - a simple and a disjunctive landmark side by side
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! wayfinder-test = { workspace = true }
//! ```

pub mod chain;
pub mod disjunctive;
pub mod lapsed;

use std::sync::Arc;

use wayfinder_core::{Fact, Task, VariableId};
use wayfinder_landmarks::LandmarkGraph;

/// A task plus the landmark graph a generation method would have produced
/// for it.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub task: Arc<Task>,
    pub graph: Arc<LandmarkGraph>,
}

/// Shorthand for building facts in tests.
pub fn fact(var: usize, value: u16) -> Fact {
    Fact::new(VariableId(var), value)
}
