//! Error types for the solver engine.

use std::time::Duration;

use loadforge_config::ConfigError;
use loadforge_core::LoadForgeError;
use loadforge_model::ModelError;
use thiserror::Error;

/// Failure to obtain any answer from a solver backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The backend could not be invoked at all.
    #[error("solver backend unavailable: {0}")]
    Unavailable(String),

    /// The caller stopped waiting for the backend.
    #[error("solver did not answer within {0:?}")]
    Timeout(Duration),
}

/// Errors that abort planning.
///
/// Solver failures never end up here: they turn into a greedy fallback
/// reported in the plan outcome.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Domain(#[from] LoadForgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for planning operations
pub type Result<T> = std::result::Result<T, PlanError>;
