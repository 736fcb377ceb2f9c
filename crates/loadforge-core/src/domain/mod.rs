//! Domain model for container loading.
//!
//! - [`Order`]: an immutable shippable item with a three-dimensional [`Demand`]
//! - [`CapacityLimits`]: the per-container limits shared by a whole run
//! - [`OrderCatalog`]: the validated, read-only order list
//! - [`Container`]: one packing unit with remaining capacity
//! - [`Assignment`]: the order-to-container mapping produced by a solver

mod assignment;
mod capacity;
mod catalog;
mod container;
mod demand;
mod order;

pub use assignment::Assignment;
pub use capacity::{CapacityLimits, DEFAULT_MAX_PALLETS, DEFAULT_MAX_VOLUME, DEFAULT_MAX_WEIGHT};
pub use catalog::OrderCatalog;
pub use container::Container;
pub use demand::{Demand, Dimension};
pub use order::{Order, OrderId};
