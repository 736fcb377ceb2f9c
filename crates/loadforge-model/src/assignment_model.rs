//! Set-partition model of container loading.
//!
//! For `n` orders and a bound of `m` candidate containers:
//!
//! ```text
//! x[i,j] ∈ {0,1}   order i goes into container j
//! y[j]   ∈ {0,1}   container j is used
//!
//! minimise   Σ_j y[j]
//! subject to Σ_j x[i,j] = 1                            for every order i
//!            Σ_i demand[i,d] · x[i,j] − limit[d] · y[j] ≤ 0   for every j, dimension d
//!            x[i,j] − y[j] ≤ 0                          for every j, zero-demand order i
//!            Σ_{j > rank(i)} x[i,j] ≤ 0                  for every order i
//!            y[j] − y[j−1] ≤ 0                          for every j ≥ 1
//! ```
//!
//! The capacity rows already force `y[j] = 1` for any container holding an
//! order with a positive demand; the linking rows cover orders whose three
//! demands are all zero.
//!
//! The last two row families remove container symmetry. `rank(i)` is the
//! position of order `i` in greedy placement order, and every packing can be
//! renumbered so containers appear in order of the lowest-ranked order they
//! hold. Used containers then form a prefix and no order sits past its rank.
//! A first-fit-decreasing plan is already numbered this way.

use std::collections::HashMap;

use loadforge_core::{
    placement_order, score_orders, Assignment, CapacityLimits, Dimension, Order, OrderCatalog,
    OrderId,
};
use tracing::debug;

use crate::error::ModelError;
use crate::model::{Comparison, Model, VarId};
use crate::solution::Solution;

/// Builds an [`AssignmentModel`].
///
/// # Example
///
/// ```
/// use loadforge_core::{CapacityLimits, Order, OrderCatalog};
/// use loadforge_model::AssignmentModelBuilder;
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let catalog = OrderCatalog::new(
///     vec![Order::new(1, 60.0, 10.0, 1.0), Order::new(2, 50.0, 10.0, 1.0)],
///     limits,
/// )
/// .unwrap();
///
/// let model = AssignmentModelBuilder::new(&catalog).build().unwrap();
/// assert_eq!(model.container_bound(), 2);
/// // 2x2 assignment variables plus 2 usage variables
/// assert_eq!(model.model().num_variables(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentModelBuilder<'a> {
    orders: &'a [Order],
    limits: CapacityLimits,
    bound: Option<usize>,
}

impl<'a> AssignmentModelBuilder<'a> {
    /// Creates a builder over a validated catalog.
    pub fn new(catalog: &'a OrderCatalog) -> Self {
        Self::from_orders(catalog.orders(), *catalog.limits())
    }

    /// Creates a builder over raw orders.
    ///
    /// Orders are not validated: an order above a limit simply makes the
    /// model infeasible, which the solver reports through its status.
    pub fn from_orders(orders: &'a [Order], limits: CapacityLimits) -> Self {
        Self {
            orders,
            limits,
            bound: None,
        }
    }

    /// Sets the number of candidate containers (default: number of orders).
    pub fn with_container_bound(mut self, bound: usize) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidBound`] for a zero bound on a non-empty
    /// order set.
    pub fn build(self) -> Result<AssignmentModel, ModelError> {
        let order_count = self.orders.len();
        let bound = self.bound.unwrap_or(order_count);
        if order_count > 0 && bound == 0 {
            return Err(ModelError::InvalidBound { bound, order_count });
        }

        let mut model = Model::new("container_loading");

        for i in 0..order_count {
            for j in 0..bound {
                model.add_binary(format!("x_{i}_{j}"));
            }
        }
        for j in 0..bound {
            model.add_binary(format!("y_{j}"));
        }

        let grid = VarGrid { order_count, bound };

        for i in 0..order_count {
            let terms = (0..bound).map(|j| (grid.x(i, j), 1.0)).collect();
            model.add_constraint(format!("assign_{i}"), terms, Comparison::Equal, 1.0);
        }

        for j in 0..bound {
            for dimension in Dimension::ALL {
                let mut terms: Vec<(VarId, f64)> = self
                    .orders
                    .iter()
                    .enumerate()
                    .filter(|(_, order)| order.demand().get(dimension) != 0.0)
                    .map(|(i, order)| (grid.x(i, j), order.demand().get(dimension)))
                    .collect();
                terms.push((grid.y(j), -self.limits.get(dimension)));
                model.add_constraint(
                    format!("{dimension}_{j}"),
                    terms,
                    Comparison::LessOrEqual,
                    0.0,
                );
            }
        }

        let mut link_rows = 0usize;
        for (i, order) in self.orders.iter().enumerate() {
            if !order.demand().is_zero() {
                continue;
            }
            for j in 0..bound {
                model.add_constraint(
                    format!("link_{i}_{j}"),
                    vec![(grid.x(i, j), 1.0), (grid.y(j), -1.0)],
                    Comparison::LessOrEqual,
                    0.0,
                );
                link_rows += 1;
            }
        }

        let mut symmetry_rows = 0usize;
        for (i, rank) in placement_ranks(self.orders, &self.limits)
            .into_iter()
            .enumerate()
        {
            if rank + 1 >= bound {
                continue;
            }
            let terms = (rank + 1..bound).map(|j| (grid.x(i, j), 1.0)).collect();
            model.add_constraint(
                format!("rank_{i}"),
                terms,
                Comparison::LessOrEqual,
                0.0,
            );
            symmetry_rows += 1;
        }
        for j in 1..bound {
            model.add_constraint(
                format!("open_order_{j}"),
                vec![(grid.y(j), 1.0), (grid.y(j - 1), -1.0)],
                Comparison::LessOrEqual,
                0.0,
            );
            symmetry_rows += 1;
        }

        model.set_objective((0..bound).map(|j| (grid.y(j), 1.0)).collect());

        debug!(
            event = "model_built",
            order_count = order_count,
            container_bound = bound,
            variable_count = model.num_variables(),
            constraint_count = model.constraints().len(),
            link_rows = link_rows,
            symmetry_rows = symmetry_rows,
        );

        let order_ids: Vec<OrderId> = self.orders.iter().map(Order::id).collect();
        let order_index = order_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        Ok(AssignmentModel {
            model,
            grid,
            order_ids,
            order_index,
        })
    }
}

/// Position of every order in greedy placement order.
fn placement_ranks(orders: &[Order], limits: &CapacityLimits) -> Vec<usize> {
    let mut ranks = vec![0; orders.len()];
    for (rank, scored) in placement_order(&score_orders(orders, limits))
        .iter()
        .enumerate()
    {
        ranks[scored.index] = rank;
    }
    ranks
}

/// Flat arena addressing: `x` variables row-major by order, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VarGrid {
    order_count: usize,
    bound: usize,
}

impl VarGrid {
    fn x(&self, order: usize, container: usize) -> VarId {
        debug_assert!(order < self.order_count && container < self.bound);
        VarId(order * self.bound + container)
    }

    fn y(&self, container: usize) -> VarId {
        debug_assert!(container < self.bound);
        VarId(self.order_count * self.bound + container)
    }
}

/// The built set-partition model plus the mapping back to orders.
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    model: Model,
    grid: VarGrid,
    order_ids: Vec<OrderId>,
    order_index: HashMap<OrderId, usize>,
}

impl AssignmentModel {
    /// Variable `x[order, container]`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of range.
    pub fn x(&self, order: usize, container: usize) -> VarId {
        self.grid.x(order, container)
    }

    /// Variable `y[container]`.
    pub fn y(&self, container: usize) -> VarId {
        self.grid.y(container)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn order_count(&self) -> usize {
        self.grid.order_count
    }

    pub fn container_bound(&self) -> usize {
        self.grid.bound
    }

    /// Model row of the order with identifier `id`.
    pub fn order_index(&self, id: OrderId) -> Option<usize> {
        self.order_index.get(&id).copied()
    }

    pub fn order_id(&self, index: usize) -> Option<OrderId> {
        self.order_ids.get(index).copied()
    }

    /// Turns variable values into an [`Assignment`].
    ///
    /// Containers are numbered densely in ascending candidate index; unused
    /// candidates disappear.
    ///
    /// # Errors
    ///
    /// - [`ModelError::NoSolution`] if the solution carries no values
    /// - [`ModelError::UnassignedOrder`] / [`ModelError::MultipleContainers`]
    ///   if the values break the one-container-per-order rows
    pub fn decode(&self, solution: &Solution) -> Result<Assignment, ModelError> {
        if !solution.has_values() {
            return Err(ModelError::NoSolution(solution.status()));
        }

        let bound = self.grid.bound;
        let mut containers: Vec<Vec<OrderId>> = vec![Vec::new(); bound];
        for (i, &id) in self.order_ids.iter().enumerate() {
            let mut chosen = (0..bound).filter(|&j| solution.is_set(self.x(i, j)));
            let j = chosen.next().ok_or(ModelError::UnassignedOrder(id))?;
            if chosen.next().is_some() {
                return Err(ModelError::MultipleContainers(id));
            }
            containers[j].push(id);
        }

        Ok(Assignment::from_containers(containers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FEASIBILITY_TOLERANCE;
    use crate::solution::SolveStatus;
    use loadforge_test::orders::{scenario_a, small_limits};

    fn values_for(model: &AssignmentModel, placement: &[(usize, usize)]) -> Vec<f64> {
        let mut values = vec![0.0; model.model().num_variables()];
        for &(i, j) in placement {
            values[model.x(i, j).index()] = 1.0;
            values[model.y(j).index()] = 1.0;
        }
        values
    }

    #[test]
    fn test_dimensions_of_default_bound() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();

        assert_eq!(model.order_count(), 3);
        assert_eq!(model.container_bound(), 3);
        assert_eq!(model.model().num_variables(), 12);
        // 3 assignment rows + 3 containers x 3 dimensions
        // + 2 rank rows + 2 open-order rows
        assert_eq!(model.model().constraints().len(), 16);
        assert_eq!(model.model().objective().len(), 3);
    }

    #[test]
    fn test_variable_arena_layout() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog)
            .with_container_bound(2)
            .build()
            .unwrap();

        assert_eq!(model.x(0, 0).index(), 0);
        assert_eq!(model.x(1, 1).index(), 3);
        assert_eq!(model.x(2, 1).index(), 5);
        assert_eq!(model.y(0).index(), 6);
        assert_eq!(model.y(1).index(), 7);
        assert_eq!(model.model().variable(model.x(2, 1)).name, "x_2_1");
        assert_eq!(model.model().variable(model.y(1)).name, "y_1");
    }

    #[test]
    fn test_capacity_rows_reject_overload() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();

        let valid = values_for(&model, &[(0, 0), (2, 0), (1, 1)]);
        assert!(model.model().is_feasible(&valid));
        assert_eq!(model.model().evaluate_objective(&valid), 2.0);

        // orders 1 and 2 weigh 110 together
        let overloaded = values_for(&model, &[(0, 0), (1, 0), (2, 1)]);
        assert!(!model.model().is_feasible(&overloaded));
    }

    #[test]
    fn test_capacity_rows_force_usage() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();

        let mut values = values_for(&model, &[(0, 0), (2, 0), (1, 1)]);
        values[model.y(1).index()] = 0.0;
        let violated = model.model().first_violated(&values).unwrap();
        assert!(model.model().constraints()[violated].name.ends_with("_1"));
    }

    #[test]
    fn test_zero_demand_orders_get_link_rows() {
        let limits = small_limits();
        let orders = vec![Order::new(1, 10.0, 10.0, 1.0), Order::new(2, 0.0, 0.0, 0.0)];
        let model = AssignmentModelBuilder::from_orders(&orders, limits)
            .build()
            .unwrap();

        // 2 assignment rows + 2x3 capacity rows + 2 link rows
        // + 1 rank row + 1 open-order row
        assert_eq!(model.model().constraints().len(), 12);

        let mut values = vec![0.0; model.model().num_variables()];
        values[model.x(0, 0).index()] = 1.0;
        values[model.y(0).index()] = 1.0;
        values[model.x(1, 1).index()] = 1.0;
        assert!(!model.model().is_feasible(&values));
    }

    #[test]
    fn test_containers_are_numbered_by_placement_rank() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();

        // Same packing as the valid one, with the containers swapped.
        let swapped = values_for(&model, &[(0, 1), (2, 1), (1, 0)]);
        let violated = model.model().first_violated(&swapped).unwrap();
        assert_eq!(model.model().constraints()[violated].name, "rank_0");

        let open = model
            .model()
            .constraints()
            .iter()
            .find(|row| row.name == "open_order_2")
            .unwrap();
        assert_eq!(open.terms, vec![(model.y(2), 1.0), (model.y(1), -1.0)]);
        assert_eq!(open.comparison, Comparison::LessOrEqual);
    }

    #[test]
    fn test_rank_rows_only_for_restricted_orders() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog)
            .with_container_bound(1)
            .build()
            .unwrap();

        assert!(model
            .model()
            .constraints()
            .iter()
            .all(|row| !row.name.starts_with("rank_") && !row.name.starts_with("open_order_")));
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        let catalog = scenario_a();
        let err = AssignmentModelBuilder::new(&catalog)
            .with_container_bound(0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidBound {
                bound: 0,
                order_count: 3
            }
        );
    }

    #[test]
    fn test_empty_orders_build_empty_model() {
        let model = AssignmentModelBuilder::from_orders(&[], small_limits())
            .build()
            .unwrap();
        assert_eq!(model.model().num_variables(), 0);
        assert!(model.model().constraints().is_empty());

        let assignment = model
            .decode(&Solution::with_values(SolveStatus::Optimal, vec![], 0.0))
            .unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_decode_renumbers_containers() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();
        let values = values_for(&model, &[(0, 2), (2, 2), (1, 0)]);
        let objective = model.model().evaluate_objective(&values);
        let solution = Solution::with_values(SolveStatus::Optimal, values, objective);

        let assignment = model.decode(&solution).unwrap();
        assert_eq!(assignment.container_count(), 2);
        assert_eq!(assignment.container_of(OrderId(2)), Some(0));
        assert_eq!(assignment.container_of(OrderId(1)), Some(1));
        assert_eq!(assignment.container_of(OrderId(3)), Some(1));
        assert!(assignment.verify(&catalog).is_ok());
    }

    #[test]
    fn test_decode_rejects_broken_values() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();

        let missing = values_for(&model, &[(0, 0), (1, 1)]);
        let solution = Solution::with_values(SolveStatus::Feasible, missing, 2.0);
        assert_eq!(
            model.decode(&solution),
            Err(ModelError::UnassignedOrder(OrderId(3)))
        );

        let doubled = values_for(&model, &[(0, 0), (0, 1), (1, 1), (2, 2)]);
        let solution = Solution::with_values(SolveStatus::Feasible, doubled, 3.0);
        assert_eq!(
            model.decode(&solution),
            Err(ModelError::MultipleContainers(OrderId(1)))
        );

        let failed = Solution::without_values(SolveStatus::Infeasible);
        assert_eq!(
            model.decode(&failed),
            Err(ModelError::NoSolution(SolveStatus::Infeasible))
        );
    }

    #[test]
    fn test_constraint_tolerance() {
        let catalog = scenario_a();
        let model = AssignmentModelBuilder::new(&catalog).build().unwrap();
        let row = &model.model().constraints()[0];
        let mut values = vec![0.0; model.model().num_variables()];
        values[model.x(0, 0).index()] = 1.0 + FEASIBILITY_TOLERANCE / 2.0;
        assert!(row.is_satisfied_by(&values, FEASIBILITY_TOLERANCE));
    }
}
