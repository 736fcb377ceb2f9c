//! Error types for model construction and decoding.

use loadforge_core::{AssignmentViolation, OrderId};
use thiserror::Error;

use crate::solution::SolveStatus;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A non-empty order set needs at least one candidate container.
    #[error("container bound {bound} is invalid for {order_count} orders")]
    InvalidBound { bound: usize, order_count: usize },

    /// The warm start uses a container the model does not declare.
    #[error("warm start uses container {container} but the model only has {bound}")]
    WarmStartOutOfBounds { container: usize, bound: usize },

    /// The warm start mentions an order the model does not know.
    #[error("warm start references unknown order {0}")]
    WarmStartUnknownOrder(OrderId),

    /// The backend returned no variable values.
    #[error("no solution to decode (status: {0})")]
    NoSolution(SolveStatus),

    /// The solution leaves an order without a container.
    #[error("order {0} is not assigned in the solution")]
    UnassignedOrder(OrderId),

    /// The solution puts an order into more than one container.
    #[error("order {0} is assigned to more than one container in the solution")]
    MultipleContainers(OrderId),

    #[error("decoded assignment is invalid: {0}")]
    Assignment(#[from] AssignmentViolation),
}
