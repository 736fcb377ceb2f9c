use super::*;
use loadforge_core::{CapacityLimits, OrderCatalog};
use loadforge_model::Model;
use loadforge_test::{ffd_trap, random_catalog, scenario_a, small_limits};

use crate::backend::UnavailableBackend;

// Catalogs here carry their own limits, so the planner takes them as given.
fn planner(config: PlannerConfig) -> Planner {
    config.validate().unwrap();
    Planner::new(backend_for(&config.exact), config.exact)
}

#[derive(Debug)]
struct SlowBackend;

impl SolverBackend for SlowBackend {
    fn solve(
        &self,
        _model: &Model,
        _limits: &SolveLimits,
    ) -> Result<loadforge_model::Solution, SolverError> {
        std::thread::sleep(Duration::from_millis(500));
        Ok(loadforge_model::Solution::without_values(SolveStatus::NotSolved))
    }

    fn name(&self) -> &'static str {
        "Slow"
    }
}

#[test]
fn test_greedy_at_lower_bound_skips_exact() {
    let outcome = planner(PlannerConfig::default())
        .plan(&scenario_a())
        .unwrap();

    assert_eq!(outcome.container_count(), 2);
    assert_eq!(outcome.lower_bound(), 2);
    assert_eq!(outcome.source(), &PlanSource::Greedy);
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(outcome.solve_stats().is_none());
}

#[test]
fn test_exact_beats_greedy_on_ffd_trap() {
    let catalog = ffd_trap();
    let outcome = planner(PlannerConfig::default()).plan(&catalog).unwrap();

    assert_eq!(outcome.greedy_container_count(), 3);
    assert_eq!(outcome.container_count(), 2);
    assert_eq!(outcome.source(), &PlanSource::Exact);
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    outcome.assignment().verify(&catalog).unwrap();
}

#[test]
fn test_warm_start_does_not_change_optimum() {
    let catalog = ffd_trap();
    let cold = planner(PlannerConfig::default().with_warm_start(false))
        .plan(&catalog)
        .unwrap();
    let warm = planner(PlannerConfig::default().with_warm_start(true))
        .plan(&catalog)
        .unwrap();

    assert_eq!(cold.container_count(), warm.container_count());
    assert_eq!(cold.status(), SolveStatus::Optimal);
    assert_eq!(warm.status(), SolveStatus::Optimal);
}

#[test]
fn test_disabled_exact_stage_returns_greedy() {
    let outcome = planner(PlannerConfig::default().without_exact_stage())
        .plan(&ffd_trap())
        .unwrap();

    assert_eq!(outcome.container_count(), 3);
    assert_eq!(outcome.source(), &PlanSource::Greedy);
    assert_eq!(outcome.status(), SolveStatus::Feasible);
}

#[test]
fn test_node_limit_without_incumbent_falls_back() {
    let config = PlannerConfig::default()
        .with_warm_start(false)
        .with_node_limit(1);
    let outcome = planner(config).plan(&ffd_trap()).unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(
        outcome.source(),
        &PlanSource::GreedyFallback {
            reason: FallbackReason::NoSolution(SolveStatus::NotSolved)
        }
    );
    assert_eq!(outcome.container_count(), 3);
    assert_eq!(outcome.status(), SolveStatus::Feasible);
    assert!(outcome.solve_stats().is_some());
}

#[test]
fn test_unavailable_backend_falls_back() {
    let planner = Planner::new(UnavailableBackend::new("offline"), ExactConfig::default());
    let outcome = planner.plan(&ffd_trap()).unwrap();

    assert_eq!(
        outcome.source(),
        &PlanSource::GreedyFallback {
            reason: FallbackReason::Solver(SolverError::Unavailable("offline".to_string()))
        }
    );
    assert_eq!(outcome.container_count(), 3);
}

#[cfg(not(feature = "milp"))]
#[test]
fn test_milp_backend_without_feature_falls_back() {
    let outcome = planner(PlannerConfig::default().with_backend(BackendType::Milp))
        .plan(&ffd_trap())
        .unwrap();

    match outcome.source() {
        PlanSource::GreedyFallback {
            reason: FallbackReason::Solver(SolverError::Unavailable(_)),
        } => {}
        other => panic!("unexpected source: {other}"),
    }
}

#[cfg(feature = "milp")]
#[test]
fn test_milp_backend_finds_optimum() {
    let outcome = planner(PlannerConfig::default().with_backend(BackendType::Milp))
        .plan(&ffd_trap())
        .unwrap();

    assert_eq!(outcome.source(), &PlanSource::Exact);
    assert_eq!(outcome.container_count(), 2);
}

#[test]
fn test_deadline_timeout_falls_back() {
    let backend = DeadlineBackend::new(SlowBackend, Duration::from_millis(10));
    let outcome = Planner::new(backend, ExactConfig::default())
        .plan(&ffd_trap())
        .unwrap();

    assert_eq!(
        outcome.source(),
        &PlanSource::GreedyFallback {
            reason: FallbackReason::Solver(SolverError::Timeout(Duration::from_millis(10)))
        }
    );
}

#[test]
fn test_tight_container_bound_skips_warm_start() {
    // Greedy needs three containers, so its plan does not fit two slots.
    let mut config = PlannerConfig::default();
    config.exact.container_bound = Some(2);
    let outcome = planner(config).plan(&ffd_trap()).unwrap();

    assert_eq!(outcome.source(), &PlanSource::Exact);
    assert_eq!(outcome.container_count(), 2);
}

#[test]
fn test_container_bound_below_lower_bound_falls_back() {
    let mut config = PlannerConfig::default();
    config.exact.container_bound = Some(1);
    let outcome = planner(config).plan(&ffd_trap()).unwrap();

    assert_eq!(
        outcome.source(),
        &PlanSource::GreedyFallback {
            reason: FallbackReason::NoSolution(SolveStatus::Infeasible)
        }
    );
}

#[test]
fn test_zero_container_bound_is_rejected() {
    let mut config = PlannerConfig::default();
    config.exact.container_bound = Some(0);
    let err = Planner::from_config(&config).unwrap_err();
    assert!(matches!(err, PlanError::Config(_)));
}

#[test]
fn test_empty_catalog_plans_nothing() {
    let outcome = planner(PlannerConfig::default())
        .plan(&OrderCatalog::empty(small_limits()))
        .unwrap();

    assert_eq!(outcome.container_count(), 0);
    assert!(outcome.assignment().is_empty());
    assert_eq!(outcome.status(), SolveStatus::Optimal);
}

#[test]
fn test_exact_never_worse_than_greedy() {
    let planner = planner(PlannerConfig::default().with_node_limit(200_000));
    for seed in 0..12 {
        let catalog = random_catalog(seed, 7, small_limits(), 0.6);
        let outcome = planner.plan(&catalog).unwrap();

        assert!(outcome.container_count() <= outcome.greedy_container_count());
        assert!(outcome.container_count() >= outcome.lower_bound());
        outcome.assignment().verify(&catalog).unwrap();
    }
}

#[test]
fn test_plan_batch_keeps_job_order() {
    let catalogs = vec![scenario_a(), ffd_trap(), OrderCatalog::empty(small_limits())];
    let counts: Vec<usize> = planner(PlannerConfig::default())
        .plan_batch(&catalogs)
        .into_iter()
        .map(|result| result.unwrap().container_count())
        .collect();

    assert_eq!(counts, vec![2, 2, 0]);
}

#[test]
fn test_catalog_limits_must_match_configured_capacity() {
    let planner = Planner::from_config(&PlannerConfig::default()).unwrap();
    assert_eq!(planner.capacity(), Some(&CapacityLimits::default()));

    let err = planner.plan(&scenario_a()).unwrap_err();
    assert!(matches!(err, PlanError::Config(ConfigError::Invalid(_))));

    let matching = Planner::from_config(&PlannerConfig::default().with_capacity(100.0, 100.0, 10.0))
        .unwrap()
        .plan(&scenario_a())
        .unwrap();
    assert_eq!(matching.container_count(), 2);
}

#[test]
fn test_explicit_capacity_on_new_planner() {
    let planner = Planner::new(BranchAndBound::new(), ExactConfig::default())
        .with_capacity(small_limits());

    assert!(planner.plan(&scenario_a()).is_ok());
    assert!(matches!(
        planner.plan(&ffd_trap()),
        Err(PlanError::Config(ConfigError::Invalid(_)))
    ));
}

#[test]
fn test_default_config_finishes_on_forty_orders() {
    let planner = Planner::from_config(&PlannerConfig::default()).unwrap();
    let limit = PlannerConfig::default().time_limit().unwrap();

    for seed in [1, 10] {
        let catalog = random_catalog(seed, 40, CapacityLimits::default(), 0.45);
        let start = Instant::now();
        let outcome = planner.plan(&catalog).unwrap();

        assert!(start.elapsed() < limit + Duration::from_secs(20));
        assert!(outcome.container_count() <= outcome.greedy_container_count());
        assert!(outcome.container_count() >= outcome.lower_bound());
        outcome.assignment().verify(&catalog).unwrap();
    }
}
