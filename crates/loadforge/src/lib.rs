//! LoadForge - multi-dimensional container loading in Rust
//!
//! Assigns orders with weight, volume and pallet demand to as few identical
//! containers as possible: a deterministic first-fit-decreasing plan first,
//! then an exact set-partition model seeded with it.
//!
//! # Example
//!
//! ```rust
//! use loadforge::prelude::*;
//!
//! let config = PlannerConfig::default().with_capacity(100.0, 100.0, 10.0);
//! let orders = vec![
//!     Order::new(1, 60.0, 10.0, 1.0),
//!     Order::new(2, 50.0, 10.0, 1.0),
//!     Order::new(3, 10.0, 10.0, 1.0),
//! ];
//!
//! let outcome = plan_orders_with(orders, &config).unwrap();
//! assert_eq!(outcome.container_count(), 2);
//! assert_eq!(outcome.assignment().container_of(OrderId(3)), Some(0));
//! ```

// Domain
pub use loadforge_core::{
    capacity_lower_bound, metric, placement_order, score_orders, Assignment, AssignmentViolation,
    CapacityLimits, Container, Demand, Dimension, LoadForgeError, Order, OrderCatalog, OrderId,
    ScoredOrder,
};

// Configuration
pub use loadforge_config::{
    BackendType, CapacityConfig, ConfigError, ExactConfig, PlannerConfig, TerminationConfig,
};

// Exact model
pub use loadforge_model::{
    inject_warm_start, AssignmentModel, AssignmentModelBuilder, Model, ModelError, Solution,
    SolveStatus,
};

// Engine
pub use loadforge_solver::{
    BranchAndBound, DeadlineBackend, FallbackReason, GreedyPacker, GreedyPlan, Incumbent,
    PlanError, PlanOutcome, PlanSource, Planner, SolveLimits, SolverBackend, SolverError,
};
#[cfg(feature = "milp")]
pub use loadforge_solver::MilpBackend;

#[cfg(feature = "console")]
pub mod console;

mod plan;
pub use plan::{plan_orders, plan_orders_streaming, plan_orders_with, CONFIG_FILE};

pub mod prelude {
    pub use super::{plan_orders, plan_orders_with};
    pub use super::{
        Assignment, CapacityLimits, Order, OrderCatalog, OrderId, PlanOutcome, PlanSource,
        PlannerConfig, Planner, SolveStatus,
    };
}
