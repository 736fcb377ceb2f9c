//! LoadForge Core - domain types for container loading
//!
//! This crate provides the fundamental abstractions shared by every
//! LoadForge stage:
//! - Orders, demands and capacity limits
//! - The validated order catalog
//! - Containers with remaining capacity
//! - Assignments and their invariants
//! - The metric scorer used to order greedy placement

pub mod bounds;
pub mod domain;
pub mod error;
pub mod metric;

pub use bounds::capacity_lower_bound;
pub use domain::{
    Assignment, CapacityLimits, Container, Demand, Dimension, Order, OrderCatalog, OrderId,
};
pub use error::{AssignmentViolation, LoadForgeError, Result};
pub use metric::{metric, placement_order, score_orders, ScoredOrder};
