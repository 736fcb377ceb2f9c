//! Per-container capacity limits.

use super::{Demand, Dimension, OrderId};
use crate::error::{LoadForgeError, Result};

pub const DEFAULT_MAX_WEIGHT: f64 = 45_000.0;
pub const DEFAULT_MAX_VOLUME: f64 = 3_600.0;
pub const DEFAULT_MAX_PALLETS: f64 = 60.0;

/// Capacity limits shared by every container of a run.
///
/// All three limits are positive and finite; [`CapacityLimits::new`]
/// rejects anything else.
///
/// # Example
///
/// ```
/// use loadforge_core::CapacityLimits;
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// assert_eq!(limits.max_pallets(), 10.0);
///
/// assert!(CapacityLimits::new(100.0, 0.0, 10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityLimits {
    max: Demand,
}

impl CapacityLimits {
    pub fn new(max_weight: f64, max_volume: f64, max_pallets: f64) -> Result<Self> {
        let max = Demand::new(max_weight, max_volume, max_pallets);
        for (dimension, value) in max.iter() {
            if !value.is_finite() || value <= 0.0 {
                return Err(LoadForgeError::InvalidCapacity { dimension, value });
            }
        }
        Ok(Self { max })
    }

    pub fn max_weight(&self) -> f64 {
        self.max.weight
    }

    pub fn max_volume(&self) -> f64 {
        self.max.volume
    }

    pub fn max_pallets(&self) -> f64 {
        self.max.pallets
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.max.get(dimension)
    }

    /// The limits as a demand triple, i.e. the capacity of an empty container.
    pub fn as_demand(&self) -> Demand {
        self.max
    }

    /// Checks a single demand against the limits.
    pub fn admits(&self, demand: &Demand) -> bool {
        demand.fits_within(&self.max)
    }

    /// Validates the demand of one order.
    ///
    /// # Errors
    ///
    /// - [`LoadForgeError::InvalidDemand`] for a negative or non-finite component
    /// - [`LoadForgeError::InfeasibleOrder`] for a component above its limit
    pub fn check_demand(&self, order: OrderId, demand: &Demand) -> Result<()> {
        for (dimension, value) in demand.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(LoadForgeError::InvalidDemand {
                    order,
                    dimension,
                    value,
                });
            }
        }
        match demand.first_exceeded(&self.max) {
            Some(dimension) => Err(LoadForgeError::InfeasibleOrder {
                order,
                dimension,
                demand: demand.get(dimension),
                limit: self.max.get(dimension),
            }),
            None => Ok(()),
        }
    }
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            max: Demand::new(DEFAULT_MAX_WEIGHT, DEFAULT_MAX_VOLUME, DEFAULT_MAX_PALLETS),
        }
    }
}
