//! Solver-neutral binary linear model.
//!
//! A [`Model`] is what crosses the solver boundary: a list of named binary
//! variables, a list of linear constraints (`terms <cmp> rhs`), a linear
//! objective to minimise, and optional initial-value hints. Backends never
//! see orders or containers.

use std::collections::BTreeMap;
use std::fmt;

/// Default absolute tolerance when checking a constraint against values.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Index of a variable in its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A binary decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::LessOrEqual => write!(f, "<="),
            Comparison::Equal => write!(f, "=="),
            Comparison::GreaterOrEqual => write!(f, ">="),
        }
    }
}

/// `sum(coefficient * variable) <comparison> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side for the given variable values.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * values[var.index()])
            .sum()
    }

    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.activity(values);
        match self.comparison {
            Comparison::LessOrEqual => lhs <= self.rhs + tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
            Comparison::GreaterOrEqual => lhs >= self.rhs - tolerance,
        }
    }
}

/// A binary linear minimisation model.
///
/// # Example
///
/// ```
/// use loadforge_model::{Comparison, Model};
///
/// let mut model = Model::new("pick_one");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.add_constraint("one", vec![(a, 1.0), (b, 1.0)], Comparison::Equal, 1.0);
/// model.set_objective(vec![(a, 3.0), (b, 2.0)]);
/// model.set_initial_value(a, 1.0);
///
/// assert_eq!(model.num_variables(), 2);
/// assert!(model.is_feasible(&[1.0, 0.0]));
/// assert!(!model.is_feasible(&[1.0, 1.0]));
/// assert_eq!(model.evaluate_objective(&[0.0, 1.0]), 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, f64)>,
    hints: BTreeMap<VarId, f64>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a new binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name: name.into() });
        id
    }

    /// Adds a linear constraint and returns its index.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        comparison: Comparison,
        rhs: f64,
    ) -> usize {
        debug_assert!(terms.iter().all(|(v, _)| v.index() < self.variables.len()));
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            comparison,
            rhs,
        });
        self.constraints.len() - 1
    }

    /// Replaces the minimisation objective.
    pub fn set_objective(&mut self, terms: Vec<(VarId, f64)>) {
        self.objective = terms;
    }

    /// Records an initial-value hint. Backends are free to ignore it.
    pub fn set_initial_value(&mut self, var: VarId, value: f64) {
        self.hints.insert(var, value);
    }

    /// Drops every initial-value hint.
    pub fn clear_initial_values(&mut self) {
        self.hints.clear();
    }

    pub fn initial_value(&self, var: VarId) -> Option<f64> {
        self.hints.get(&var).copied()
    }

    /// Initial-value hints in variable order.
    pub fn initial_values(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.hints.iter().map(|(&v, &value)| (v, value))
    }

    pub fn has_initial_values(&self) -> bool {
        !self.hints.is_empty()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(var, coefficient)| coefficient * values[var.index()])
            .sum()
    }

    /// Returns the index of the first constraint `values` violates.
    pub fn first_violated(&self, values: &[f64]) -> Option<usize> {
        self.constraints
            .iter()
            .position(|c| !c.is_satisfied_by(values, FEASIBILITY_TOLERANCE))
    }

    /// Checks every constraint. `values` must hold one entry per variable.
    pub fn is_feasible(&self, values: &[f64]) -> bool {
        values.len() == self.variables.len() && self.first_violated(values).is_none()
    }
}
