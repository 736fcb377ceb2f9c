//! Order-to-container assignments.

use std::collections::BTreeMap;

use super::{Demand, OrderCatalog, OrderId};
use crate::error::{AssignmentViolation, Result};

/// Relative slack tolerated when re-summing loads in [`Assignment::verify`].
const LOAD_TOLERANCE: f64 = 1e-9;

/// A mapping from each order to exactly one container.
///
/// Container indices are dense (`0..container_count`) and follow the order in
/// which the producing solver first used each container. Containers that end
/// up empty are never part of an assignment.
///
/// # Example
///
/// ```
/// use loadforge_core::{Assignment, OrderId};
///
/// let assignment = Assignment::from_containers(vec![
///     vec![OrderId(1), OrderId(3)],
///     vec![],
///     vec![OrderId(2)],
/// ])
/// .unwrap();
///
/// assert_eq!(assignment.container_count(), 2);
/// assert_eq!(assignment.container_of(OrderId(2)), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    containers: Vec<Vec<OrderId>>,
    container_of: BTreeMap<OrderId, usize>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from per-container order lists.
    ///
    /// Empty containers are dropped and the rest renumbered densely.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentViolation::DuplicateAssignment`] if an order
    /// appears more than once.
    pub fn from_containers<I, C>(containers: I) -> std::result::Result<Self, AssignmentViolation>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = OrderId>,
    {
        let mut assignment = Self::new();
        for container in containers {
            let orders: Vec<OrderId> = container.into_iter().collect();
            if orders.is_empty() {
                continue;
            }
            let index = assignment.containers.len();
            for &id in &orders {
                if assignment.container_of.insert(id, index).is_some() {
                    return Err(AssignmentViolation::DuplicateAssignment(id));
                }
            }
            assignment.containers.push(orders);
        }
        Ok(assignment)
    }

    /// Number of containers holding at least one order.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of assigned orders.
    pub fn len(&self) -> usize {
        self.container_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container_of.is_empty()
    }

    pub fn container_of(&self, order: OrderId) -> Option<usize> {
        self.container_of.get(&order).copied()
    }

    /// Orders per container.
    pub fn containers(&self) -> &[Vec<OrderId>] {
        &self.containers
    }

    /// Iterates `(order, container)` pairs in order-identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderId, usize)> + '_ {
        self.container_of.iter().map(|(&id, &c)| (id, c))
    }

    /// Summed demand of the orders in `container`.
    ///
    /// Orders unknown to `catalog` contribute nothing.
    pub fn load_of(&self, container: usize, catalog: &OrderCatalog) -> Demand {
        self.containers
            .get(container)
            .map(|orders| {
                orders
                    .iter()
                    .filter_map(|&id| catalog.find(id))
                    .map(|order| order.demand())
                    .sum()
            })
            .unwrap_or_default()
    }

    /// Re-checks completeness and capacity against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant found.
    pub fn verify(&self, catalog: &OrderCatalog) -> Result<()> {
        for &id in self.container_of.keys() {
            if catalog.index_of(id).is_none() {
                return Err(AssignmentViolation::UnknownOrder(id).into());
            }
        }
        for order in catalog {
            if !self.container_of.contains_key(&order.id()) {
                return Err(AssignmentViolation::Unassigned(order.id()).into());
            }
        }

        let limits = catalog.limits();
        for container in 0..self.containers.len() {
            let load = self.load_of(container, catalog);
            for (dimension, value) in load.iter() {
                let limit = limits.get(dimension);
                if value > limit + LOAD_TOLERANCE * limit.max(1.0) {
                    return Err(AssignmentViolation::OverCapacity {
                        container,
                        dimension,
                        load: value,
                        limit,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
