//! Solver backends.
//!
//! A backend receives a solver-neutral [`Model`] and returns a status plus,
//! when one exists, a value for every variable. Callers never see which
//! solver ran.

mod branch_and_bound;
mod deadline;
#[cfg(feature = "milp")]
mod milp;

use std::fmt::Debug;
use std::time::Duration;

use loadforge_config::TerminationConfig;
use loadforge_model::{Model, Solution};

use crate::error::SolverError;

pub use branch_and_bound::{BranchAndBound, Incumbent};
pub use deadline::DeadlineBackend;
#[cfg(feature = "milp")]
pub use milp::MilpBackend;

/// A solver that can minimise a binary linear model.
///
/// A backend returns `Ok` with [`SolveStatus::Infeasible`](loadforge_model::SolveStatus::Infeasible)
/// or [`SolveStatus::NotSolved`](loadforge_model::SolveStatus::NotSolved)
/// when it ran but produced nothing usable; `Err` is reserved for calls
/// that never produced an answer.
pub trait SolverBackend: Send + Sync + Debug {
    fn solve(&self, model: &Model, limits: &SolveLimits) -> Result<Solution, SolverError>;

    /// Returns the backend name for logging.
    fn name(&self) -> &'static str;
}

impl<B: SolverBackend + ?Sized> SolverBackend for Box<B> {
    fn solve(&self, model: &Model, limits: &SolveLimits) -> Result<Solution, SolverError> {
        (**self).solve(model, limits)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Limits for a single solver call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveLimits {
    /// Wall-clock budget for the search.
    pub time_limit: Option<Duration>,

    /// Maximum number of search nodes.
    pub node_limit: Option<u64>,

    /// Accept an incumbent once its relative gap to the bound is this small.
    pub relative_gap: Option<f64>,

    /// An objective value no solution can beat. Reaching it proves optimality.
    pub objective_lower_bound: Option<f64>,
}

impl SolveLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_relative_gap(mut self, gap: f64) -> Self {
        self.relative_gap = Some(gap);
        self
    }

    pub fn with_objective_lower_bound(mut self, bound: f64) -> Self {
        self.objective_lower_bound = Some(bound);
        self
    }
}

impl From<&TerminationConfig> for SolveLimits {
    fn from(config: &TerminationConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            node_limit: config.node_limit,
            relative_gap: config.relative_gap,
            objective_lower_bound: None,
        }
    }
}

/// A backend that cannot be invoked, for example a MILP backend requested
/// from a build without the `milp` feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SolverBackend for UnavailableBackend {
    fn solve(&self, _model: &Model, _limits: &SolveLimits) -> Result<Solution, SolverError> {
        Err(SolverError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "Unavailable"
    }
}
