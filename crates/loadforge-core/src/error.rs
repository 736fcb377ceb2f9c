//! Error types for LoadForge

use thiserror::Error;

use crate::domain::{Dimension, OrderId};

/// Main error type for LoadForge domain operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadForgeError {
    /// An order demands more than a container can ever hold
    #[error("order {order} is infeasible: {dimension} demand {demand} exceeds limit {limit}")]
    InfeasibleOrder {
        order: OrderId,
        dimension: Dimension,
        demand: f64,
        limit: f64,
    },

    /// A capacity limit is zero, negative or not a finite number
    #[error("invalid {dimension} capacity limit: {value}")]
    InvalidCapacity { dimension: Dimension, value: f64 },

    /// An order carries a negative or non-finite demand
    #[error("order {order} has invalid {dimension} demand: {value}")]
    InvalidDemand {
        order: OrderId,
        dimension: Dimension,
        value: f64,
    },

    /// Two orders share the same identifier
    #[error("duplicate order identifier {0}")]
    DuplicateOrder(OrderId),

    /// An assignment broke the capacity or completeness invariant
    #[error("assignment violation: {0}")]
    AssignmentViolation(#[from] AssignmentViolation),
}

impl LoadForgeError {
    /// Returns true for errors raised while validating capacity limits or demands.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LoadForgeError::InvalidCapacity { .. } | LoadForgeError::InvalidDemand { .. }
        )
    }
}

/// A broken assignment invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentViolation {
    #[error("order {0} is not assigned to any container")]
    Unassigned(OrderId),

    #[error("order {0} is assigned more than once")]
    DuplicateAssignment(OrderId),

    #[error("order {0} is not part of the catalog")]
    UnknownOrder(OrderId),

    #[error("container {container} exceeds {dimension} capacity: load {load} > limit {limit}")]
    OverCapacity {
        container: usize,
        dimension: Dimension,
        load: f64,
        limit: f64,
    },
}

/// Result type alias for LoadForge domain operations
pub type Result<T> = std::result::Result<T, LoadForgeError>;
