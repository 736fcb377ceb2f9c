//! Tests for planner configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [capacity]
        max_weight = 100.0
        max_volume = 100.0
        max_pallets = 10.0

        [exact]
        warm_start = false
        backend = "milp"
        container_bound = 12

        [exact.termination]
        seconds_spent_limit = 30
        node_limit = 5000
        relative_gap = 0.05
    "#;

    let config = PlannerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.capacity.max_pallets, 10.0);
    assert!(config.exact.enabled);
    assert!(!config.exact.warm_start);
    assert_eq!(config.exact.backend, BackendType::Milp);
    assert_eq!(config.exact.container_bound, Some(12));
    assert_eq!(config.exact.termination.node_limit, Some(5000));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        capacity:
          max_weight: 45000.0
          max_volume: 3600.0
          max_pallets: 60.0
        exact:
          enabled: false
          termination:
            seconds_spent_limit: 0
            millis_spent_limit: 250
    "#;

    let config = PlannerConfig::from_yaml_str(yaml).unwrap();
    assert!(!config.exact.enabled);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = PlannerConfig::from_toml_str("").unwrap();
    assert_eq!(config, PlannerConfig::default());

    let limits = config.capacity_limits().unwrap();
    assert_eq!(limits.max_weight(), 45_000.0);
    assert_eq!(limits.max_volume(), 3_600.0);
    assert_eq!(limits.max_pallets(), 60.0);
    assert!(config.exact.enabled);
    assert!(config.exact.warm_start);
    assert_eq!(
        config.time_limit(),
        Some(Duration::from_secs(DEFAULT_SECONDS_SPENT_LIMIT))
    );
}

#[test]
fn test_time_limit_defaults_and_overrides() {
    let config = PlannerConfig::from_toml_str("[exact.termination]\nnode_limit = 10\n").unwrap();
    assert_eq!(
        config.time_limit(),
        Some(Duration::from_secs(DEFAULT_SECONDS_SPENT_LIMIT))
    );

    let unlimited = PlannerConfig::from_toml_str("[exact.termination]\nseconds_spent_limit = 0\n")
        .unwrap();
    assert_eq!(unlimited.time_limit(), None);
    assert_eq!(PlannerConfig::new().without_time_limit().time_limit(), None);
}

#[test]
fn test_huge_time_limit_saturates() {
    let mut config = PlannerConfig::new();
    config.exact.termination.seconds_spent_limit = Some(u64::MAX);
    config.exact.termination.millis_spent_limit = Some(u64::MAX);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_partial_capacity_keeps_other_defaults() {
    let config = PlannerConfig::from_toml_str("[capacity]\nmax_pallets = 30.0\n").unwrap();
    assert_eq!(config.capacity.max_pallets, 30.0);
    assert_eq!(config.capacity.max_weight, 45_000.0);
}

#[test]
fn test_builder() {
    let config = PlannerConfig::new()
        .with_capacity(100.0, 100.0, 10.0)
        .with_time_limit_seconds(5)
        .with_node_limit(100)
        .with_backend(BackendType::BranchAndBound)
        .with_warm_start(false);

    assert_eq!(config.capacity.max_weight, 100.0);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
    assert_eq!(config.exact.termination.node_limit, Some(100));
    assert!(!config.exact.warm_start);

    let greedy_only = PlannerConfig::new().without_exact_stage();
    assert!(!greedy_only.exact.enabled);
}

#[test]
fn test_invalid_capacity_is_rejected() {
    let config = PlannerConfig::new().with_capacity(100.0, 0.0, 10.0);
    assert!(matches!(
        config.capacity_limits(),
        Err(ConfigError::Capacity(_))
    ));
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_gap_and_bound_are_rejected() {
    let mut config = PlannerConfig::new();
    config.exact.termination.relative_gap = Some(1.5);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = PlannerConfig::new();
    config.exact.container_bound = Some(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unknown_backend_fails_to_parse() {
    let result = PlannerConfig::from_toml_str("[exact]\nbackend = \"gurobi\"\n");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = PlannerConfig::load("does-not-exist/loadforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_backend_type_display() {
    assert_eq!(format!("{}", BackendType::BranchAndBound), "BranchAndBound");
    assert_eq!(format!("{}", BackendType::Milp), "Milp");
}
