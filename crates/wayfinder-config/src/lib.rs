//! Configuration system for Wayfinder.
//!
//! Load heuristic and search configuration from TOML files to control the
//! evaluator and the driver without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use wayfinder_config::{CostPartitioningMode, WayfinderConfig};
//!
//! let config = WayfinderConfig::from_toml_str(r#"
//!     [heuristic]
//!     admissible = true
//!     cost_partitioning = "uniform"
//!     preferred_operators = true
//!
//!     [search]
//!     max_expansions = 100000
//! "#).unwrap();
//!
//! assert!(config.heuristic.admissible);
//! assert_eq!(config.heuristic.cost_partitioning, CostPartitioningMode::Uniform);
//! assert_eq!(config.search.max_expansions, Some(100000));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use wayfinder_config::WayfinderConfig;
//!
//! let config = WayfinderConfig::load("wayfinder.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main Wayfinder configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WayfinderConfig {
    /// Heuristic evaluator configuration.
    #[serde(default)]
    pub heuristic: HeuristicConfig,

    /// Search driver configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

impl WayfinderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heuristic.cost_partitioning == CostPartitioningMode::Optimal
            && !self.heuristic.admissible
        {
            return Err(ConfigError::Invalid(
                "optimal cost partitioning requires admissible = true".to_string(),
            ));
        }
        Ok(())
    }

    /// Enables the admissible estimate.
    pub fn with_admissible(mut self, admissible: bool) -> Self {
        self.heuristic.admissible = admissible;
        self
    }

    /// Selects the cost partitioning mode.
    pub fn with_cost_partitioning(mut self, mode: CostPartitioningMode) -> Self {
        self.heuristic.cost_partitioning = mode;
        self
    }

    /// Enables preferred-operator computation.
    pub fn with_preferred_operators(mut self, preferred: bool) -> Self {
        self.heuristic.preferred_operators = preferred;
        self
    }

    /// Bounds the driver's number of expansions.
    pub fn with_max_expansions(mut self, bound: u64) -> Self {
        self.search.max_expansions = Some(bound);
        self
    }
}

/// Heuristic evaluator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeuristicConfig {
    /// Request an admissible estimate (cost partitioning instead of the
    /// counting formula).
    #[serde(default)]
    pub admissible: bool,

    /// Cost partitioning mode, only used when `admissible` is set.
    #[serde(default)]
    pub cost_partitioning: CostPartitioningMode,

    /// Compute preferred operators alongside the estimate.
    #[serde(default)]
    pub preferred_operators: bool,
}

/// Cost partitioning mode selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPartitioningMode {
    /// Uniform distribution of each operator's cost over the landmarks it
    /// achieves.
    #[default]
    Uniform,

    /// Optimal (LP-based) cost partitioning; requires a caller-supplied
    /// strategy backed by an LP solver.
    Optimal,
}

impl fmt::Display for CostPartitioningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostPartitioningMode::Uniform => write!(f, "uniform"),
            CostPartitioningMode::Optimal => write!(f, "optimal"),
        }
    }
}

/// Search driver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum number of state expansions before the driver gives up.
    #[serde(default)]
    pub max_expansions: Option<u64>,
}

#[cfg(test)]
mod tests;
