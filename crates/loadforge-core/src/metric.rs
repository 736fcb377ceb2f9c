//! Metric scorer.
//!
//! The metric of an order is the sum of its per-dimension fill fractions:
//!
//! ```text
//! metric = weight / max_weight + volume / max_volume + pallets / max_pallets
//! ```
//!
//! It is only ever used as a sort key for greedy placement. Values are not
//! clamped: a fraction above 1 in any dimension already marks the order as
//! infeasible.

use crate::domain::{CapacityLimits, Demand, Order, OrderId};

/// Computes the composite fullness score of one demand.
///
/// # Example
///
/// ```
/// use loadforge_core::{metric, CapacityLimits, Demand};
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let m = metric(&Demand::new(50.0, 25.0, 5.0), &limits);
/// assert!((m - 1.25).abs() < 1e-12);
/// ```
pub fn metric(demand: &Demand, limits: &CapacityLimits) -> f64 {
    demand.weight / limits.max_weight()
        + demand.volume / limits.max_volume()
        + demand.pallets / limits.max_pallets()
}

/// An order annotated with its catalog position and metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredOrder {
    /// Position in the catalog the order was scored from.
    pub index: usize,
    pub id: OrderId,
    pub demand: Demand,
    pub metric: f64,
}

/// Scores every order, keeping input order.
pub fn score_orders(orders: &[Order], limits: &CapacityLimits) -> Vec<ScoredOrder> {
    orders
        .iter()
        .enumerate()
        .map(|(index, order)| ScoredOrder {
            index,
            id: order.id(),
            demand: order.demand(),
            metric: metric(&order.demand(), limits),
        })
        .collect()
}

/// Sorts scored orders by metric, largest first.
///
/// The sort is stable, so ties keep their input order and the result is
/// fully deterministic.
pub fn placement_order(scored: &[ScoredOrder]) -> Vec<ScoredOrder> {
    let mut sorted = scored.to_vec();
    sorted.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> CapacityLimits {
        CapacityLimits::new(100.0, 100.0, 10.0).unwrap()
    }

    #[test]
    fn test_metric_sums_fill_fractions() {
        let m = metric(&Demand::new(60.0, 10.0, 1.0), &limits());
        assert!((m - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_metric_is_not_clamped() {
        let m = metric(&Demand::new(0.0, 0.0, 11.0), &limits());
        assert!(m > 1.0);
    }

    #[test]
    fn test_metric_of_default_limits() {
        let m = metric(&Demand::new(45_000.0, 3_600.0, 60.0), &CapacityLimits::default());
        assert!((m - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_placement_order_descending() {
        let orders = vec![
            Order::new(1, 10.0, 10.0, 1.0),
            Order::new(2, 60.0, 10.0, 1.0),
            Order::new(3, 50.0, 10.0, 1.0),
        ];
        let sorted = placement_order(&score_orders(&orders, &limits()));
        let ids: Vec<u64> = sorted.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(sorted[0].index, 1);
    }

    #[test]
    fn test_placement_order_ties_keep_input_order() {
        let orders = vec![
            Order::new(5, 10.0, 10.0, 1.0),
            Order::new(3, 10.0, 10.0, 1.0),
            Order::new(9, 20.0, 10.0, 1.0),
            Order::new(1, 10.0, 10.0, 1.0),
        ];
        let sorted = placement_order(&score_orders(&orders, &limits()));
        let ids: Vec<u64> = sorted.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![9, 5, 3, 1]);
    }
}
