//! Lower bounds on the container count.

use crate::domain::{CapacityLimits, Demand, Dimension};

/// Slack absorbed before rounding a fill ratio up.
const RATIO_EPSILON: f64 = 1e-9;

/// Returns `max over dimensions of ceil(total demand / limit)`.
///
/// No assignment can use fewer containers. A non-empty order set needs at
/// least one container even if all its demands are zero, so pass
/// `order_count` to distinguish "no orders" from "orders with zero demand".
///
/// # Example
///
/// ```
/// use loadforge_core::{capacity_lower_bound, CapacityLimits, Demand};
///
/// let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
/// let total = Demand::new(120.0, 30.0, 3.0);
/// assert_eq!(capacity_lower_bound(&total, 3, &limits), 2);
/// assert_eq!(capacity_lower_bound(&Demand::ZERO, 0, &limits), 0);
/// ```
pub fn capacity_lower_bound(total: &Demand, order_count: usize, limits: &CapacityLimits) -> usize {
    if order_count == 0 {
        return 0;
    }
    Dimension::ALL
        .into_iter()
        .map(|d| {
            let ratio = total.get(d) / limits.get(d);
            (ratio - RATIO_EPSILON).ceil().max(0.0) as usize
        })
        .max()
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
        let total = Demand::new(200.0, 10.0, 1.0);
        assert_eq!(capacity_lower_bound(&total, 4, &limits), 2);
    }

    #[test]
    fn test_largest_dimension_wins() {
        let limits = CapacityLimits::new(100.0, 100.0, 10.0).unwrap();
        let total = Demand::new(50.0, 50.0, 31.0);
        assert_eq!(capacity_lower_bound(&total, 5, &limits), 4);
    }

    #[test]
    fn test_zero_demand_orders_need_one_container() {
        let limits = CapacityLimits::default();
        assert_eq!(capacity_lower_bound(&Demand::ZERO, 2, &limits), 1);
    }
}
