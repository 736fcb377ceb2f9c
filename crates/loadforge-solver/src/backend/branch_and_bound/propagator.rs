//! Partial assignments with bound propagation over linear rows.

use loadforge_model::{Comparison, Model, FEASIBILITY_TOLERANCE};

/// Returned when a row can no longer be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Conflict;

/// Binary domains for every variable, with an undo trail.
#[derive(Debug)]
pub(super) struct Propagator<'m> {
    model: &'m Model,
    values: Vec<Option<bool>>,
    trail: Vec<usize>,
    // Rows each variable appears in.
    occurrences: Vec<Vec<usize>>,
    costs: Vec<f64>,
    queued: Vec<bool>,
    queue: Vec<usize>,
}

impl<'m> Propagator<'m> {
    pub(super) fn new(model: &'m Model) -> Self {
        let n = model.num_variables();
        let mut occurrences = vec![Vec::new(); n];
        for (row, constraint) in model.constraints().iter().enumerate() {
            for &(var, _) in &constraint.terms {
                let rows: &mut Vec<usize> = &mut occurrences[var.index()];
                if rows.last() != Some(&row) {
                    rows.push(row);
                }
            }
        }
        let mut costs = vec![0.0; n];
        for &(var, coefficient) in model.objective() {
            costs[var.index()] += coefficient;
        }
        Self {
            model,
            values: vec![None; n],
            trail: Vec::with_capacity(n),
            occurrences,
            costs,
            queued: vec![false; model.constraints().len()],
            queue: Vec::new(),
        }
    }

    pub(super) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub(super) fn cost(&self, var: usize) -> f64 {
        self.costs[var]
    }

    /// Fixes a free variable.
    pub(super) fn assign(&mut self, var: usize, value: bool) {
        debug_assert!(self.values[var].is_none());
        self.values[var] = Some(value);
        self.trail.push(var);
    }

    /// Frees every variable fixed after the trail had `len` entries.
    pub(super) fn undo_to(&mut self, len: usize) {
        while self.trail.len() > len {
            if let Some(var) = self.trail.pop() {
                self.values[var] = None;
            }
        }
    }

    /// First free variable in declaration order.
    pub(super) fn first_free(&self) -> Option<usize> {
        self.values.iter().position(Option::is_none)
    }

    /// Objective of the fixed part plus every negative cost still free.
    pub(super) fn objective_bound(&self) -> f64 {
        self.values
            .iter()
            .zip(&self.costs)
            .map(|(value, &cost)| match value {
                Some(true) => cost,
                Some(false) => 0.0,
                None => cost.min(0.0),
            })
            .sum()
    }

    /// Current values with free variables at zero.
    pub(super) fn values(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|value| if *value == Some(true) { 1.0 } else { 0.0 })
            .collect()
    }

    /// Propagates every row.
    pub(super) fn propagate_all(&mut self) -> Result<(), Conflict> {
        for row in 0..self.model.constraints().len() {
            self.enqueue(row);
        }
        self.run()
    }

    /// Propagates rows touched by variables fixed since trail position `from`.
    pub(super) fn propagate_from(&mut self, from: usize) -> Result<(), Conflict> {
        for position in from..self.trail.len() {
            let var = self.trail[position];
            for i in 0..self.occurrences[var].len() {
                let row = self.occurrences[var][i];
                self.enqueue(row);
            }
        }
        self.run()
    }

    fn enqueue(&mut self, row: usize) {
        if !self.queued[row] {
            self.queued[row] = true;
            self.queue.push(row);
        }
    }

    fn run(&mut self) -> Result<(), Conflict> {
        let mut fixings = Vec::new();
        while let Some(row) = self.queue.pop() {
            self.queued[row] = false;
            fixings.clear();
            if let Err(conflict) = self.propagate_row(row, &mut fixings) {
                self.clear_queue();
                return Err(conflict);
            }
            for &(var, value) in &fixings {
                match self.values[var] {
                    Some(current) if current == value => {}
                    Some(_) => {
                        self.clear_queue();
                        return Err(Conflict);
                    }
                    None => {
                        self.assign(var, value);
                        for i in 0..self.occurrences[var].len() {
                            let touched = self.occurrences[var][i];
                            self.enqueue(touched);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn clear_queue(&mut self) {
        for row in self.queue.drain(..) {
            self.queued[row] = false;
        }
    }

    /// Checks one row against its activity range and collects forced values.
    fn propagate_row(&self, row: usize, fixings: &mut Vec<(usize, bool)>) -> Result<(), Conflict> {
        let constraint = &self.model.constraints()[row];
        let tolerance = FEASIBILITY_TOLERANCE;
        let (mut min, mut max) = (0.0, 0.0);
        for &(var, coefficient) in &constraint.terms {
            match self.values[var.index()] {
                Some(true) => {
                    min += coefficient;
                    max += coefficient;
                }
                Some(false) => {}
                None if coefficient < 0.0 => min += coefficient,
                None => max += coefficient,
            }
        }

        let upper = matches!(
            constraint.comparison,
            Comparison::LessOrEqual | Comparison::Equal
        );
        let lower = matches!(
            constraint.comparison,
            Comparison::GreaterOrEqual | Comparison::Equal
        );
        let rhs = constraint.rhs;

        if (upper && min > rhs + tolerance) || (lower && max < rhs - tolerance) {
            return Err(Conflict);
        }

        for &(var, coefficient) in &constraint.terms {
            if self.values[var.index()].is_some() || coefficient == 0.0 {
                continue;
            }
            let magnitude = coefficient.abs();
            // Setting the variable against its sign moves min up or max down by |a|.
            if upper && min + magnitude > rhs + tolerance {
                fixings.push((var.index(), coefficient < 0.0));
            }
            if lower && max - magnitude < rhs - tolerance {
                fixings.push((var.index(), coefficient > 0.0));
            }
        }
        Ok(())
    }
}
