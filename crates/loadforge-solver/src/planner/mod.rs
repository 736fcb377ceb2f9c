//! Planner: greedy packing, optional exact improvement, explicit fallback.
//!
//! ```text
//! catalog ──► score + greedy ──► lower bound reached? ──yes──► greedy (optimal)
//!                                    │ no
//!                                    ▼
//!              build model ──► warm start ──► backend ──► decode + verify
//!                                                │ failure
//!                                                ▼
//!                                   greedy with fallback reason
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use loadforge_config::{BackendType, ConfigError, ExactConfig, PlannerConfig};
use loadforge_core::{
    capacity_lower_bound, Assignment, CapacityLimits, LoadForgeError, OrderCatalog,
};
use loadforge_model::{
    inject_warm_start, AssignmentModelBuilder, ModelError, SolveStats, SolveStatus,
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BranchAndBound, DeadlineBackend, SolveLimits, SolverBackend};
use crate::error::{PlanError, SolverError};
use crate::greedy::{GreedyPacker, GreedyPlan};

/// Why the exact stage did not produce the returned plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    #[error("solver finished with status {0}")]
    NoSolution(SolveStatus),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("solution could not be decoded: {0}")]
    Decode(ModelError),

    #[error("solution failed verification: {0}")]
    Invalid(LoadForgeError),

    #[error("exact plan uses {exact} containers, greedy {greedy}")]
    NotImproved { exact: usize, greedy: usize },
}

/// Which stage produced a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSource {
    /// The greedy packer; the exact stage was disabled or not needed.
    Greedy,
    /// The exact model.
    Exact,
    /// The greedy packer, after the exact stage failed.
    GreedyFallback { reason: FallbackReason },
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanSource::Greedy => write!(f, "Greedy"),
            PlanSource::Exact => write!(f, "Exact"),
            PlanSource::GreedyFallback { reason } => write!(f, "GreedyFallback({reason})"),
        }
    }
}

/// A finished plan.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    assignment: Assignment,
    source: PlanSource,
    status: SolveStatus,
    greedy_container_count: usize,
    lower_bound: usize,
    solve_stats: Option<SolveStats>,
    elapsed: Duration,
}

impl PlanOutcome {
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    pub fn container_count(&self) -> usize {
        self.assignment.container_count()
    }

    pub fn source(&self) -> &PlanSource {
        &self.source
    }

    /// `Optimal` when the plan is proven minimal, otherwise `Feasible`.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PlanSource::GreedyFallback { .. })
    }

    pub fn greedy_container_count(&self) -> usize {
        self.greedy_container_count
    }

    /// The capacity lower bound on the container count.
    pub fn lower_bound(&self) -> usize {
        self.lower_bound
    }

    /// Backend statistics, when the exact stage ran.
    pub fn solve_stats(&self) -> Option<&SolveStats> {
        self.solve_stats.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Returns the backend selected by `exact`, wrapped in a deadline when a
/// wait limit is set.
pub fn backend_for(exact: &ExactConfig) -> Box<dyn SolverBackend> {
    let backend: Box<dyn SolverBackend> = match exact.backend {
        BackendType::BranchAndBound => Box::new(BranchAndBound::new()),
        #[cfg(feature = "milp")]
        BackendType::Milp => Box::new(crate::backend::MilpBackend::new()),
        #[cfg(not(feature = "milp"))]
        BackendType::Milp => Box::new(crate::backend::UnavailableBackend::new(
            "loadforge-solver was built without the `milp` feature",
        )),
    };
    match exact.termination.wait_limit() {
        Some(wait) => Box::new(DeadlineBackend::new(backend, wait)),
        None => backend,
    }
}

/// Runs the packing pipeline against one backend.
///
/// # Example
///
/// ```
/// use loadforge_config::PlannerConfig;
/// use loadforge_core::{CapacityLimits, Order, OrderCatalog};
/// use loadforge_solver::{PlanSource, Planner};
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let catalog = OrderCatalog::new(
///     vec![
///         Order::new(1, 60.0, 10.0, 1.0),
///         Order::new(2, 50.0, 10.0, 1.0),
///         Order::new(3, 10.0, 10.0, 1.0),
///     ],
///     limits,
/// )
/// .unwrap();
///
/// let config = PlannerConfig::default().with_capacity(100.0, 100.0, 10.0);
/// let planner = Planner::from_config(&config).unwrap();
/// let outcome = planner.plan(&catalog).unwrap();
/// assert_eq!(outcome.container_count(), 2);
/// assert_eq!(outcome.source(), &PlanSource::Greedy);
/// ```
#[derive(Debug)]
pub struct Planner<B = Box<dyn SolverBackend>> {
    backend: B,
    exact: ExactConfig,
    capacity: Option<CapacityLimits>,
}

impl Planner {
    /// Validates `config` and selects its backend.
    ///
    /// The planner then only accepts catalogs built with the configured
    /// capacity.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self {
            backend: backend_for(&config.exact),
            exact: config.exact.clone(),
            capacity: Some(config.capacity_limits()?),
        })
    }
}

impl<B: SolverBackend> Planner<B> {
    /// Creates a planner that packs every catalog against its own limits.
    pub fn new(backend: B, exact: ExactConfig) -> Self {
        Self {
            backend,
            exact,
            capacity: None,
        }
    }

    /// Rejects catalogs whose limits differ from `limits`.
    pub fn with_capacity(mut self, limits: CapacityLimits) -> Self {
        self.capacity = Some(limits);
        self
    }

    /// Capacity every planned catalog must use, if fixed.
    pub fn capacity(&self) -> Option<&CapacityLimits> {
        self.capacity.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn exact_config(&self) -> &ExactConfig {
        &self.exact
    }

    /// Plans one catalog.
    ///
    /// # Errors
    ///
    /// Fails only on invalid input: an order beyond the limits, a catalog
    /// whose limits differ from the configured capacity, or a container
    /// bound of zero. Solver failures yield a greedy plan with
    /// [`PlanSource::GreedyFallback`].
    pub fn plan(&self, catalog: &OrderCatalog) -> Result<PlanOutcome, PlanError> {
        if let Some(limits) = &self.capacity {
            if limits != catalog.limits() {
                return Err(ConfigError::Invalid(format!(
                    "catalog limits {:?} differ from configured capacity {:?}",
                    catalog.limits(),
                    limits
                ))
                .into());
            }
        }

        let start = Instant::now();
        info!(
            event = "plan_start",
            orders = catalog.len(),
            exact = self.exact.enabled,
            backend = self.backend.name(),
        );

        let greedy = GreedyPacker::new(*catalog.limits()).pack_catalog(catalog)?;
        let lower_bound =
            capacity_lower_bound(&catalog.total_demand(), catalog.len(), catalog.limits());
        let run = PlanRun {
            greedy,
            lower_bound,
            start,
        };

        if run.greedy.container_count() == lower_bound {
            debug!(event = "greedy_proven_optimal", containers = lower_bound);
            return Ok(run.finish(PlanSource::Greedy, SolveStatus::Optimal, None));
        }
        if !self.exact.enabled {
            return Ok(run.finish(PlanSource::Greedy, SolveStatus::Feasible, None));
        }

        let bound = self.exact.container_bound.unwrap_or(catalog.len());
        let mut model = AssignmentModelBuilder::new(catalog)
            .with_container_bound(bound)
            .build()?;
        if self.exact.warm_start {
            if let Err(e) = inject_warm_start(&mut model, run.greedy.assignment()) {
                warn!(event = "warm_start_skipped", reason = %e);
            }
        }

        let limits = SolveLimits::from(&self.exact.termination)
            .with_objective_lower_bound(lower_bound as f64);
        let solution = match self.backend.solve(model.model(), &limits) {
            Ok(solution) => solution,
            Err(e) => return Ok(run.fall_back(e.into(), None)),
        };
        let stats = Some(*solution.stats());
        if !solution.has_values() {
            return Ok(run.fall_back(FallbackReason::NoSolution(solution.status()), stats));
        }

        let assignment = match model.decode(&solution) {
            Ok(assignment) => assignment,
            Err(e) => return Ok(run.fall_back(FallbackReason::Decode(e), stats)),
        };
        if let Err(e) = assignment.verify(catalog) {
            return Ok(run.fall_back(FallbackReason::Invalid(e), stats));
        }
        let greedy_count = run.greedy.container_count();
        if assignment.container_count() > greedy_count {
            let reason = FallbackReason::NotImproved {
                exact: assignment.container_count(),
                greedy: greedy_count,
            };
            return Ok(run.fall_back(reason, stats));
        }

        Ok(run.finish_with(assignment, PlanSource::Exact, solution.status(), stats))
    }

    /// Plans independent catalogs in parallel.
    pub fn plan_batch(&self, catalogs: &[OrderCatalog]) -> Vec<Result<PlanOutcome, PlanError>> {
        catalogs.par_iter().map(|catalog| self.plan(catalog)).collect()
    }
}

struct PlanRun {
    greedy: GreedyPlan,
    lower_bound: usize,
    start: Instant,
}

impl PlanRun {
    fn fall_back(self, reason: FallbackReason, stats: Option<SolveStats>) -> PlanOutcome {
        warn!(
            event = "exact_fallback",
            reason = %reason,
            containers = self.greedy.container_count(),
        );
        self.finish(
            PlanSource::GreedyFallback { reason },
            SolveStatus::Feasible,
            stats,
        )
    }

    fn finish(
        self,
        source: PlanSource,
        status: SolveStatus,
        stats: Option<SolveStats>,
    ) -> PlanOutcome {
        let assignment = self.greedy.assignment().clone();
        self.finish_with(assignment, source, status, stats)
    }

    fn finish_with(
        self,
        assignment: Assignment,
        source: PlanSource,
        status: SolveStatus,
        solve_stats: Option<SolveStats>,
    ) -> PlanOutcome {
        let elapsed = self.start.elapsed();
        info!(
            event = "plan_end",
            source = %source,
            status = %status,
            containers = assignment.container_count(),
            greedy_containers = self.greedy.container_count(),
            lower_bound = self.lower_bound,
            duration_ms = elapsed.as_millis() as u64,
        );
        PlanOutcome {
            greedy_container_count: self.greedy.container_count(),
            assignment,
            source,
            status,
            lower_bound: self.lower_bound,
            solve_stats,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests;
