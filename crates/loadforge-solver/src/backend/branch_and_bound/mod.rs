//! Built-in binary branch-and-bound backend.
//!
//! Depth-first search over the binary variables in declaration order with
//! bound propagation on every linear row. A node is pruned when the
//! objective of its fixed part, plus every negative cost still free, cannot
//! beat the incumbent. Initial-value hints on the model seed the incumbent
//! and steer the value tried first at each branch.

mod propagator;

use std::time::{Duration, Instant};

use loadforge_model::{Model, Solution, SolveStats, SolveStatus, FEASIBILITY_TOLERANCE};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::{SolveLimits, SolverBackend};
use crate::error::SolverError;
use propagator::Propagator;

/// An improved solution found during search.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub objective: f64,
    pub values: Vec<f64>,
    /// Search nodes visited when it was found.
    pub nodes: u64,
}

/// Exact backend for binary models, with no external solver.
///
/// # Example
///
/// ```
/// use loadforge_model::{Comparison, Model, SolveStatus};
/// use loadforge_solver::{BranchAndBound, SolveLimits, SolverBackend};
///
/// let mut model = Model::new("pick_one");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.add_constraint("one", vec![(a, 1.0), (b, 1.0)], Comparison::Equal, 1.0);
/// model.set_objective(vec![(a, 3.0), (b, 2.0)]);
///
/// let solution = BranchAndBound::new().solve(&model, &SolveLimits::new()).unwrap();
/// assert_eq!(solution.status(), SolveStatus::Optimal);
/// assert!(solution.is_set(b));
/// assert_eq!(solution.objective(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    sender: Option<mpsc::UnboundedSender<Incumbent>>,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Streams every improved incumbent to `sender` as it is found.
    pub fn with_incumbent_sender(mut self, sender: mpsc::UnboundedSender<Incumbent>) -> Self {
        self.sender = Some(sender);
        self
    }
}

// How often the clock is read, in nodes.
const CLOCK_INTERVAL: u64 = 64;

struct Frame {
    var: usize,
    trail_len: usize,
    alternative: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Exhausted,
    Proven,
    GapReached,
    NodeLimit,
    TimeLimit,
}

impl SolverBackend for BranchAndBound {
    fn solve(&self, model: &Model, limits: &SolveLimits) -> Result<Solution, SolverError> {
        let start = Instant::now();
        info!(
            event = "solve_start",
            backend = self.name(),
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.constraints().len(),
            hints = model.has_initial_values(),
        );

        let mut search = Search::new(model, limits, self.sender.as_ref(), start);
        let stop = search.run();
        let elapsed = start.elapsed();
        let stats = SolveStats {
            nodes: search.nodes,
            incumbents: search.incumbents,
            elapsed,
        };

        let solution = match (search.best.take(), stop) {
            (Some((objective, values)), Stop::Exhausted | Stop::Proven) => {
                Solution::with_values(SolveStatus::Optimal, values, objective)
            }
            (Some((objective, values)), _) => {
                Solution::with_values(SolveStatus::Feasible, values, objective)
            }
            (None, Stop::Exhausted | Stop::Proven) => {
                Solution::without_values(SolveStatus::Infeasible)
            }
            (None, _) => Solution::without_values(SolveStatus::NotSolved),
        }
        .with_stats(stats);

        info!(
            event = "solve_end",
            backend = self.name(),
            status = %solution.status(),
            stop = ?stop,
            objective = solution.objective(),
            nodes = stats.nodes,
            incumbents = stats.incumbents,
            duration_ms = elapsed.as_millis() as u64,
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "BranchAndBound"
    }
}

struct Search<'a> {
    model: &'a Model,
    propagator: Propagator<'a>,
    limits: &'a SolveLimits,
    sender: Option<&'a mpsc::UnboundedSender<Incumbent>>,
    start: Instant,
    hints: Vec<Option<bool>>,
    // Required decrease of the objective for a new incumbent.
    improvement: f64,
    lower_bound: f64,
    best: Option<(f64, Vec<f64>)>,
    nodes: u64,
    incumbents: u64,
}

impl<'a> Search<'a> {
    fn new(
        model: &'a Model,
        limits: &'a SolveLimits,
        sender: Option<&'a mpsc::UnboundedSender<Incumbent>>,
        start: Instant,
    ) -> Self {
        // With integral costs on binaries every objective value is an integer.
        let integral = model
            .objective()
            .iter()
            .all(|&(_, coefficient)| coefficient.fract() == 0.0);
        let mut hints = vec![None; model.num_variables()];
        for (var, value) in model.initial_values() {
            hints[var.index()] = Some(value > 0.5);
        }
        Self {
            model,
            propagator: Propagator::new(model),
            limits,
            sender,
            start,
            hints,
            improvement: if integral { 1.0 } else { FEASIBILITY_TOLERANCE },
            lower_bound: f64::NEG_INFINITY,
            best: None,
            nodes: 0,
            incumbents: 0,
        }
    }

    fn run(&mut self) -> Stop {
        self.seed_from_hints();

        if self.propagator.propagate_all().is_err() {
            debug!(event = "root_infeasible", model = self.model.name());
            return Stop::Exhausted;
        }
        self.lower_bound = self.propagator.objective_bound();
        if let Some(bound) = self.limits.objective_lower_bound {
            self.lower_bound = self.lower_bound.max(bound);
        }
        if let Some(stop) = self.check_incumbent() {
            return stop;
        }

        let mut stack: Vec<Frame> = Vec::new();
        'search: loop {
            self.nodes += 1;
            if let Some(stop) = self.check_limits() {
                return stop;
            }

            if !self.is_pruned() {
                match self.propagator.first_free() {
                    None => {
                        self.record_leaf();
                        if let Some(stop) = self.check_incumbent() {
                            return stop;
                        }
                    }
                    Some(var) => {
                        let first = self.preferred_value(var);
                        let trail_len = self.propagator.trail_len();
                        stack.push(Frame {
                            var,
                            trail_len,
                            alternative: Some(!first),
                        });
                        self.propagator.assign(var, first);
                        if self.propagator.propagate_from(trail_len).is_ok() {
                            continue 'search;
                        }
                        trace!(event = "conflict", var, value = first, depth = stack.len());
                    }
                }
            }

            // Backtrack to the deepest branch with an untried value.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return Stop::Exhausted;
                };
                self.propagator.undo_to(frame.trail_len);
                match frame.alternative.take() {
                    Some(value) => {
                        let var = frame.var;
                        let trail_len = frame.trail_len;
                        self.propagator.assign(var, value);
                        if self.propagator.propagate_from(trail_len).is_ok() {
                            continue 'search;
                        }
                        trace!(event = "conflict", var, value, depth = stack.len());
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        }
    }

    /// Completes the hints with zeros and keeps them if they are feasible.
    fn seed_from_hints(&mut self) {
        if !self.model.has_initial_values() {
            return;
        }
        let values: Vec<f64> = self
            .hints
            .iter()
            .map(|hint| if *hint == Some(true) { 1.0 } else { 0.0 })
            .collect();
        match self.model.first_violated(&values) {
            None => {
                let objective = self.model.evaluate_objective(&values);
                debug!(event = "warm_start_accepted", objective);
                self.accept(objective, values);
            }
            Some(row) => {
                debug!(
                    event = "warm_start_rejected",
                    constraint = %self.model.constraints()[row].name,
                );
            }
        }
    }

    fn preferred_value(&self, var: usize) -> bool {
        self.hints[var].unwrap_or_else(|| self.propagator.cost(var) <= 0.0)
    }

    fn is_pruned(&self) -> bool {
        match &self.best {
            Some((objective, _)) => {
                self.propagator.objective_bound()
                    > objective - self.improvement + FEASIBILITY_TOLERANCE
            }
            None => false,
        }
    }

    fn record_leaf(&mut self) {
        let values = self.propagator.values();
        if !self.model.is_feasible(&values) {
            return;
        }
        let objective = self.model.evaluate_objective(&values);
        let improves = match &self.best {
            Some((best, _)) => objective <= best - self.improvement + FEASIBILITY_TOLERANCE,
            None => true,
        };
        if improves {
            self.accept(objective, values);
        }
    }

    fn accept(&mut self, objective: f64, values: Vec<f64>) {
        self.incumbents += 1;
        debug!(
            event = "new_incumbent",
            objective,
            nodes = self.nodes,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
        );
        if let Some(sender) = self.sender {
            let _ = sender.send(Incumbent {
                objective,
                values: values.clone(),
                nodes: self.nodes,
            });
        }
        self.best = Some((objective, values));
    }

    /// Stops once the incumbent meets the lower bound or the gap limit.
    fn check_incumbent(&self) -> Option<Stop> {
        let (objective, _) = self.best.as_ref()?;
        if *objective <= self.lower_bound + FEASIBILITY_TOLERANCE {
            return Some(Stop::Proven);
        }
        let gap_limit = self.limits.relative_gap?;
        let gap = (objective - self.lower_bound) / objective.abs().max(FEASIBILITY_TOLERANCE);
        (gap <= gap_limit).then_some(Stop::GapReached)
    }

    fn check_limits(&self) -> Option<Stop> {
        if let Some(limit) = self.limits.node_limit {
            if self.nodes > limit {
                return Some(Stop::NodeLimit);
            }
        }
        if let Some(limit) = self.limits.time_limit {
            if self.nodes % CLOCK_INTERVAL == 0 && self.elapsed() >= limit {
                return Some(Stop::TimeLimit);
            }
        }
        None
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests;
