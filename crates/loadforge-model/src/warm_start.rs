//! Warm-start injection.
//!
//! Translates a feasible assignment (typically the greedy plan) into
//! initial-value hints: `x[order, container] = 1` for every placement and
//! `y[container] = 1` for every used container. Every other variable is left
//! without a hint. Hints are advisory; they never change what the model
//! accepts.

use loadforge_core::Assignment;
use tracing::debug;

use crate::assignment_model::AssignmentModel;
use crate::error::ModelError;

/// Seeds `model` from `assignment` and returns the number of hints written.
///
/// Container `c` of the assignment maps to candidate container `c` of the
/// model. Any previous hints are replaced. The assignment is only read.
///
/// # Errors
///
/// Fails without touching the model if the assignment references an order
/// the model does not contain or a container index at or above the bound.
///
/// # Example
///
/// ```
/// use loadforge_core::{Assignment, CapacityLimits, Order, OrderCatalog, OrderId};
/// use loadforge_model::{inject_warm_start, AssignmentModelBuilder};
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let catalog = OrderCatalog::new(
///     vec![Order::new(1, 60.0, 10.0, 1.0), Order::new(2, 50.0, 10.0, 1.0)],
///     limits,
/// )
/// .unwrap();
/// let mut model = AssignmentModelBuilder::new(&catalog).build().unwrap();
/// let greedy = Assignment::from_containers(vec![vec![OrderId(1)], vec![OrderId(2)]]).unwrap();
///
/// let hints = inject_warm_start(&mut model, &greedy).unwrap();
/// assert_eq!(hints, 4);
/// assert_eq!(model.model().initial_value(model.x(1, 1)), Some(1.0));
/// assert_eq!(model.model().initial_value(model.x(1, 0)), None);
/// ```
pub fn inject_warm_start(
    model: &mut AssignmentModel,
    assignment: &Assignment,
) -> Result<usize, ModelError> {
    let bound = model.container_bound();
    let mut placements = Vec::with_capacity(assignment.len());

    for (container, orders) in assignment.containers().iter().enumerate() {
        if container >= bound {
            return Err(ModelError::WarmStartOutOfBounds { container, bound });
        }
        for &id in orders {
            let order = model
                .order_index(id)
                .ok_or(ModelError::WarmStartUnknownOrder(id))?;
            placements.push((order, container));
        }
    }

    let x_vars: Vec<_> = placements.iter().map(|&(i, j)| model.x(i, j)).collect();
    let y_vars: Vec<_> = (0..assignment.container_count())
        .map(|j| model.y(j))
        .collect();

    let inner = model.model_mut();
    inner.clear_initial_values();
    for &var in x_vars.iter().chain(&y_vars) {
        inner.set_initial_value(var, 1.0);
    }

    let hints = x_vars.len() + y_vars.len();
    debug!(
        event = "warm_start_injected",
        hints = hints,
        containers = y_vars.len(),
    );
    Ok(hints)
}
