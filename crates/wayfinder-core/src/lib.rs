//! Wayfinder Core - Task model and shared types for heuristic planning
//!
//! This crate provides the fundamental abstractions for Wayfinder:
//! - Facts, variables and states of a multi-valued planning task
//! - Operators with costs and conditional effects
//! - The planning task itself, assembled through a builder
//! - The shared error type

pub mod error;
pub mod fact;
pub mod operator;
pub mod state;
pub mod task;

pub use error::{Result, WayfinderError};
pub use fact::{Fact, Variable, VariableId};
pub use operator::{Effect, Operator, OperatorId};
pub use state::State;
pub use task::{Task, TaskBuilder};
