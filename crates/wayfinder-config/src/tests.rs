//! Tests for Wayfinder configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [heuristic]
        admissible = true
        cost_partitioning = "uniform"
        preferred_operators = true

        [search]
        max_expansions = 5000
    "#;

    let config = WayfinderConfig::from_toml_str(toml).unwrap();
    assert!(config.heuristic.admissible);
    assert_eq!(
        config.heuristic.cost_partitioning,
        CostPartitioningMode::Uniform
    );
    assert!(config.heuristic.preferred_operators);
    assert_eq!(config.search.max_expansions, Some(5000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        heuristic:
          admissible: true
          cost_partitioning: optimal
        search:
          max_expansions: 100
    "#;

    let config = WayfinderConfig::from_yaml_str(yaml).unwrap();
    assert!(config.heuristic.admissible);
    assert_eq!(
        config.heuristic.cost_partitioning,
        CostPartitioningMode::Optimal
    );
}

#[test]
fn test_defaults() {
    let config = WayfinderConfig::from_toml_str("").unwrap();
    assert!(!config.heuristic.admissible);
    assert_eq!(
        config.heuristic.cost_partitioning,
        CostPartitioningMode::Uniform
    );
    assert!(!config.heuristic.preferred_operators);
    assert_eq!(config.search.max_expansions, None);
}

#[test]
fn test_builder() {
    let config = WayfinderConfig::new()
        .with_admissible(true)
        .with_cost_partitioning(CostPartitioningMode::Optimal)
        .with_preferred_operators(true)
        .with_max_expansions(42);
    assert!(config.heuristic.admissible);
    assert_eq!(
        config.heuristic.cost_partitioning,
        CostPartitioningMode::Optimal
    );
    assert_eq!(config.search.max_expansions, Some(42));
}

#[test]
fn test_optimal_requires_admissible() {
    let toml = r#"
        [heuristic]
        admissible = false
        cost_partitioning = "optimal"
    "#;

    let err = WayfinderConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_mode_display() {
    assert_eq!(CostPartitioningMode::Uniform.to_string(), "uniform");
    assert_eq!(CostPartitioningMode::Optimal.to_string(), "optimal");
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = WayfinderConfig::load("does-not-exist.toml").unwrap_or_default();
    assert!(!config.heuristic.admissible);
}
