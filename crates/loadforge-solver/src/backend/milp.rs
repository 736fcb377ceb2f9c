//! MILP backend through `good_lp` with the pure-Rust `microlp` solver.
//!
//! `microlp` solves to optimality and exposes neither hints nor limits, so
//! both are ignored here; wrap the backend in a
//! [`DeadlineBackend`](super::DeadlineBackend) to bound the wait.

use std::time::Instant;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError,
    Solution as LpSolution, SolverModel, Variable as LpVariable,
};
use loadforge_model::{Comparison, Model, Solution, SolveStats, SolveStatus, VarId};
use tracing::{info, warn};

use super::{SolveLimits, SolverBackend};
use crate::error::SolverError;

#[derive(Debug, Clone, Copy, Default)]
pub struct MilpBackend;

impl MilpBackend {
    pub fn new() -> Self {
        Self
    }
}

fn linear(terms: &[(VarId, f64)], vars: &[LpVariable]) -> Expression {
    terms
        .iter()
        .map(|&(var, coefficient)| coefficient * vars[var.index()])
        .fold(Expression::from(0.0), |acc, term| acc + term)
}

impl SolverBackend for MilpBackend {
    fn solve(&self, model: &Model, _limits: &SolveLimits) -> Result<Solution, SolverError> {
        let start = Instant::now();
        info!(
            event = "solve_start",
            backend = self.name(),
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.constraints().len(),
        );

        if model.num_variables() == 0 {
            return Ok(if model.is_feasible(&[]) {
                Solution::with_values(SolveStatus::Optimal, Vec::new(), 0.0)
            } else {
                Solution::without_values(SolveStatus::Infeasible)
            });
        }

        let mut vars = ProblemVariables::new();
        let lp_vars: Vec<LpVariable> = model
            .variables()
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name.clone())))
            .collect();

        let mut problem = vars
            .minimise(linear(model.objective(), &lp_vars))
            .using(microlp);
        for row in model.constraints() {
            let lhs = linear(&row.terms, &lp_vars);
            let rhs = row.rhs;
            problem = problem.with(match row.comparison {
                Comparison::LessOrEqual => constraint!(lhs <= rhs),
                Comparison::Equal => constraint!(lhs == rhs),
                Comparison::GreaterOrEqual => constraint!(lhs >= rhs),
            });
        }

        let solution = match problem.solve() {
            Ok(found) => {
                let values: Vec<f64> = lp_vars
                    .iter()
                    .map(|&var| if found.value(var) > 0.5 { 1.0 } else { 0.0 })
                    .collect();
                let objective = model.evaluate_objective(&values);
                Solution::with_values(SolveStatus::Optimal, values, objective)
            }
            Err(ResolutionError::Infeasible) => Solution::without_values(SolveStatus::Infeasible),
            Err(e) => return Err(SolverError::Unavailable(e.to_string())),
        };

        let elapsed = start.elapsed();
        let found = solution.has_values();
        if !found {
            warn!(event = "solve_no_solution", backend = self.name(), status = %solution.status());
        }
        info!(
            event = "solve_end",
            backend = self.name(),
            status = %solution.status(),
            objective = solution.objective(),
            duration_ms = elapsed.as_millis() as u64,
        );
        Ok(solution.with_stats(SolveStats {
            nodes: 0,
            incumbents: u64::from(found),
            elapsed,
        }))
    }

    fn name(&self) -> &'static str {
        "Milp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadforge_model::AssignmentModelBuilder;
    use loadforge_test::{ffd_trap, scenario_a};

    #[test]
    fn test_milp_matches_known_optima() {
        for (catalog, optimum) in [(scenario_a(), 2.0), (ffd_trap(), 2.0)] {
            let model = AssignmentModelBuilder::new(&catalog).build().unwrap();
            let solution = MilpBackend::new()
                .solve(model.model(), &SolveLimits::new())
                .unwrap();

            assert_eq!(solution.status(), SolveStatus::Optimal);
            assert_eq!(solution.objective(), Some(optimum));
            model.decode(&solution).unwrap().verify(&catalog).unwrap();
        }
    }
}
