//! LoadForge Model - exact formulation of container loading
//!
//! This crate provides:
//! - A solver-neutral binary linear model (variables, linear constraints,
//!   minimisation objective, initial-value hints)
//! - The assignment model builder: the set-partition formulation with
//!   `x[i,j]` / `y[j]` variables over a flat arena
//! - The warm-start injector seeding the model from a greedy assignment
//! - Solution and status types returned by solver backends

pub mod assignment_model;
pub mod error;
pub mod model;
pub mod solution;
pub mod warm_start;

pub use assignment_model::{AssignmentModel, AssignmentModelBuilder};
pub use error::ModelError;
pub use model::{Comparison, LinearConstraint, Model, VarId, Variable, FEASIBILITY_TOLERANCE};
pub use solution::{Solution, SolveStats, SolveStatus};
pub use warm_start::inject_warm_start;
