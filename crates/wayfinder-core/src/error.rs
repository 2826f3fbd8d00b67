//! Error types for Wayfinder

use thiserror::Error;

/// Main error type for Wayfinder operations
#[derive(Debug, Error)]
pub enum WayfinderError {
    /// Error in the task model definition
    #[error("Task model error: {0}")]
    TaskModel(String),

    /// Error in the landmark graph definition
    #[error("Landmark graph error: {0}")]
    LandmarkGraph(String),

    /// Invalid operation for the current state of a component
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Wayfinder operations
pub type Result<T> = std::result::Result<T, WayfinderError>;
