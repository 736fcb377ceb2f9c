//! Shippable orders.

use std::fmt;

use super::Demand;

/// Externally assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable order record.
///
/// The metric is derived separately (see [`crate::metric`]) and is not part
/// of an order's identity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    id: OrderId,
    demand: Demand,
}

impl Order {
    pub fn new(id: impl Into<OrderId>, weight: f64, volume: f64, pallets: f64) -> Self {
        Self::with_demand(id, Demand::new(weight, volume, pallets))
    }

    pub fn with_demand(id: impl Into<OrderId>, demand: Demand) -> Self {
        Self {
            id: id.into(),
            demand,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn demand(&self) -> Demand {
        self.demand
    }

    pub fn weight(&self) -> f64 {
        self.demand.weight
    }

    pub fn volume(&self) -> f64 {
        self.demand.volume
    }

    pub fn pallets(&self) -> f64 {
        self.demand.pallets
    }
}
