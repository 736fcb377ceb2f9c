//! Solver results.

use std::fmt;
use std::time::Duration;

use crate::model::VarId;

/// Outcome of a solver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A solution was found but a limit stopped the proof of optimality.
    Feasible,
    /// The model has no feasible solution.
    Infeasible,
    /// A limit was hit before any solution was found.
    NotSolved,
}

impl SolveStatus {
    /// Returns true if the status carries variable values.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Feasible => write!(f, "Feasible"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::NotSolved => write!(f, "NotSolved"),
        }
    }
}

/// Search statistics reported by a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes: u64,
    pub incumbents: u64,
    pub elapsed: Duration,
}

/// Status plus, when available, a 0/1 value for every variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: SolveStatus,
    values: Vec<f64>,
    objective: Option<f64>,
    stats: SolveStats,
}

impl Solution {
    /// A solution with values. `status` must be `Optimal` or `Feasible`.
    pub fn with_values(status: SolveStatus, values: Vec<f64>, objective: f64) -> Self {
        debug_assert!(status.has_solution());
        Self {
            status,
            values,
            objective: Some(objective),
            stats: SolveStats::default(),
        }
    }

    /// A status-only failure (`Infeasible` or `NotSolved`).
    pub fn without_values(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            stats: SolveStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: SolveStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn has_values(&self) -> bool {
        self.status.has_solution()
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Returns true if `var` is set (value above one half).
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var).is_some_and(|v| v > 0.5)
    }
}
