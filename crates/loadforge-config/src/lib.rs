//! Configuration system for LoadForge.
//!
//! Load planner configuration from TOML or YAML files to control capacity
//! limits and the exact optimization stage without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use loadforge_config::{BackendType, PlannerConfig};
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [capacity]
//!     max_weight = 40000.0
//!
//!     [exact]
//!     backend = "branch_and_bound"
//!     [exact.termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.capacity.max_weight, 40000.0);
//! assert_eq!(config.capacity.max_volume, 3600.0);
//! assert_eq!(config.exact.backend, BackendType::BranchAndBound);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use loadforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("loadforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use loadforge_core::domain::{DEFAULT_MAX_PALLETS, DEFAULT_MAX_VOLUME, DEFAULT_MAX_WEIGHT};
use loadforge_core::{CapacityLimits, LoadForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid capacity: {0}")]
    Capacity(#[from] LoadForgeError),
}

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Container capacity limits.
    #[serde(default)]
    pub capacity: CapacityConfig,

    /// Exact optimization stage.
    #[serde(default)]
    pub exact: ExactConfig,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the container capacity limits.
    pub fn with_capacity(mut self, max_weight: f64, max_volume: f64, max_pallets: f64) -> Self {
        self.capacity = CapacityConfig {
            max_weight,
            max_volume,
            max_pallets,
        };
        self
    }

    /// Sets the exact stage time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.exact.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Lets the exact stage run until it proves optimality.
    pub fn without_time_limit(mut self) -> Self {
        self.exact.termination.seconds_spent_limit = None;
        self.exact.termination.millis_spent_limit = None;
        self
    }

    /// Sets the exact stage node limit.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.exact.termination.node_limit = Some(nodes);
        self
    }

    /// Selects the exact stage backend.
    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.exact.backend = backend;
        self
    }

    /// Enables or disables warm starting the exact stage from the greedy plan.
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.exact.warm_start = warm_start;
        self
    }

    /// Disables the exact stage; plans are produced by the greedy packer alone.
    pub fn without_exact_stage(mut self) -> Self {
        self.exact.enabled = false;
        self
    }

    /// Returns the validated capacity limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Capacity`] if a limit is not positive and finite.
    pub fn capacity_limits(&self) -> Result<CapacityLimits, ConfigError> {
        self.capacity.to_limits()
    }

    /// Returns the exact stage time limit, if configured.
    ///
    /// Convenience method that delegates to `exact.termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.exact.termination.time_limit()
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity_limits()?;
        if let Some(gap) = self.exact.termination.relative_gap {
            if !(0.0..=1.0).contains(&gap) {
                return Err(ConfigError::Invalid(format!(
                    "relative_gap must be within [0, 1], got {gap}"
                )));
            }
        }
        if self.exact.container_bound == Some(0) {
            return Err(ConfigError::Invalid(
                "container_bound must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Container capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct CapacityConfig {
    pub max_weight: f64,
    pub max_volume: f64,
    pub max_pallets: f64,
}

impl CapacityConfig {
    /// Converts to validated limits.
    pub fn to_limits(&self) -> Result<CapacityLimits, ConfigError> {
        Ok(CapacityLimits::new(
            self.max_weight,
            self.max_volume,
            self.max_pallets,
        )?)
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
            max_volume: DEFAULT_MAX_VOLUME,
            max_pallets: DEFAULT_MAX_PALLETS,
        }
    }
}

/// Exact optimization stage configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ExactConfig {
    /// Whether to run the exact model after the greedy packer.
    pub enabled: bool,

    /// Whether to seed the exact model with the greedy plan.
    pub warm_start: bool,

    /// Solver backend.
    pub backend: BackendType,

    /// Number of candidate containers; defaults to the order count.
    pub container_bound: Option<usize>,

    /// Limits for the solver call.
    pub termination: TerminationConfig,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            warm_start: true,
            backend: BackendType::default(),
            container_bound: None,
            termination: TerminationConfig::default(),
        }
    }
}

/// Solver backend types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Built-in binary branch-and-bound.
    #[default]
    BranchAndBound,

    /// External MILP solver through `good_lp` (requires the `milp` feature).
    Milp,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::BranchAndBound => write!(f, "BranchAndBound"),
            BackendType::Milp => write!(f, "Milp"),
        }
    }
}

/// Time limit of the exact stage when none is configured.
pub const DEFAULT_SECONDS_SPENT_LIMIT: u64 = 10;

/// Termination configuration for the solver call.
///
/// Seconds and milliseconds add up. Setting both to zero removes the time
/// limit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving (default: 10).
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes.
    pub node_limit: Option<u64>,

    /// Stop once `(incumbent - bound) / incumbent` drops to this value.
    pub relative_gap: Option<f64>,

    /// Stop waiting for the backend after this many seconds, even if it keeps running.
    pub wait_seconds_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(DEFAULT_SECONDS_SPENT_LIMIT),
            millis_spent_limit: None,
            node_limit: None,
            relative_gap: None,
            wait_seconds_limit: None,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Returns the caller-side wait limit as a Duration, if any.
    pub fn wait_limit(&self) -> Option<Duration> {
        self.wait_seconds_limit.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests;
