//! LoadForge Solver Engine
//!
//! This crate provides the packing engine:
//! - Greedy first-fit-decreasing packer
//! - The `SolverBackend` boundary and its backends (built-in branch-and-bound,
//!   optional `good_lp` MILP, deadline wrapper)
//! - The planner chaining greedy, warm start and exact stages with an
//!   explicit greedy fallback
//!
//! Logging levels:
//! - **INFO**: Plan start/end, packing and solve summaries
//! - **DEBUG**: Opened containers, incumbents, warm start handling
//! - **TRACE**: Search node details

pub mod backend;
pub mod error;
pub mod greedy;
pub mod planner;

pub use backend::{
    BranchAndBound, DeadlineBackend, Incumbent, SolveLimits, SolverBackend, UnavailableBackend,
};
#[cfg(feature = "milp")]
pub use backend::MilpBackend;
pub use error::{PlanError, SolverError};
pub use greedy::{GreedyPacker, GreedyPlan};
pub use planner::{backend_for, FallbackReason, PlanOutcome, PlanSource, Planner};
