//! Shared test fixtures for LoadForge crates.
//!
//! This crate provides order sets and capacity limits for testing.
//! It depends only on `loadforge-core` so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`orders`] - hand-built scenarios with known greedy and optimal counts
//! - [`random`] - seeded random catalogs for property-style checks
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! loadforge-test = { workspace = true }
//! ```
//!
//! ```
//! use loadforge_test::orders::scenario_a;
//!
//! let catalog = scenario_a();
//! assert_eq!(catalog.len(), 3);
//! ```

pub mod orders;
pub mod random;

pub use orders::{ffd_trap, scenario_a, small_limits};
pub use random::random_catalog;
