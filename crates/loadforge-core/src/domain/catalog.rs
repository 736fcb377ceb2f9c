//! The validated order catalog.

use std::collections::HashMap;

use super::{CapacityLimits, Demand, Order, OrderId};
use crate::error::{LoadForgeError, Result};
use crate::metric::{score_orders, ScoredOrder};

/// The validated, read-only list of orders for one run.
///
/// Construction rejects invalid capacity input up-front so that no packing
/// work starts on data that cannot be placed:
/// - negative or non-finite demands
/// - duplicate order identifiers
/// - orders exceeding a capacity limit in any dimension
///
/// # Example
///
/// ```
/// use loadforge_core::{CapacityLimits, Order, OrderCatalog};
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let catalog = OrderCatalog::new(
///     vec![Order::new(1, 60.0, 10.0, 1.0), Order::new(2, 50.0, 10.0, 1.0)],
///     limits,
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.index_of(2.into()), Some(1));
///
/// let too_big = OrderCatalog::new(vec![Order::new(3, 10.0, 10.0, 11.0)], limits);
/// assert!(too_big.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OrderCatalog {
    orders: Vec<Order>,
    limits: CapacityLimits,
    index: HashMap<OrderId, usize>,
}

impl OrderCatalog {
    /// Validates and takes ownership of `orders`.
    pub fn new(orders: impl IntoIterator<Item = Order>, limits: CapacityLimits) -> Result<Self> {
        let orders: Vec<Order> = orders.into_iter().collect();
        let mut index = HashMap::with_capacity(orders.len());

        for (i, order) in orders.iter().enumerate() {
            limits.check_demand(order.id(), &order.demand())?;
            if index.insert(order.id(), i).is_some() {
                return Err(LoadForgeError::DuplicateOrder(order.id()));
            }
        }

        Ok(Self {
            orders,
            limits,
            index,
        })
    }

    /// Creates an empty catalog.
    pub fn empty(limits: CapacityLimits) -> Self {
        Self {
            orders: Vec::new(),
            limits,
            index: HashMap::new(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn limits(&self) -> &CapacityLimits {
        &self.limits
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Order> {
        self.orders.get(index)
    }

    /// Returns the catalog position of the order with identifier `id`.
    pub fn index_of(&self, id: OrderId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Looks an order up by identifier.
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.index_of(id).map(|i| &self.orders[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> Demand {
        self.orders.iter().map(Order::demand).sum()
    }

    /// Scores every order, in catalog order.
    pub fn scored(&self) -> Vec<ScoredOrder> {
        score_orders(&self.orders, &self.limits)
    }
}

impl<'a> IntoIterator for &'a OrderCatalog {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
