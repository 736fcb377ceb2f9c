//! Containers with remaining capacity.

use smallvec::SmallVec;

use super::{CapacityLimits, Demand};

/// One packing unit.
///
/// Tracks the remaining capacity and the catalog indices of the orders placed
/// in it. Containers never reference each other, so a plain indexed `Vec` of
/// them is the whole ownership structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    index: usize,
    remaining: Demand,
    orders: SmallVec<[usize; 8]>,
}

impl Container {
    /// Opens an empty container with the full limits available.
    pub fn open(index: usize, limits: &CapacityLimits) -> Self {
        Self {
            index,
            remaining: limits.as_demand(),
            orders: SmallVec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> Demand {
        self.remaining
    }

    /// Catalog indices of the placed orders, in placement order.
    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns true if `demand` fits in the remaining capacity on all three axes.
    pub fn can_fit(&self, demand: &Demand) -> bool {
        demand.fits_within(&self.remaining)
    }

    /// Places an order, consuming its demand.
    ///
    /// Callers check [`Container::can_fit`] first; remaining capacity is only
    /// ever decremented after headroom has been verified.
    pub fn place(&mut self, order_index: usize, demand: &Demand) {
        debug_assert!(self.can_fit(demand));
        self.remaining -= *demand;
        self.orders.push(order_index);
    }

    /// The load carried so far.
    pub fn load(&self, limits: &CapacityLimits) -> Demand {
        limits.as_demand() - self.remaining
    }
}
