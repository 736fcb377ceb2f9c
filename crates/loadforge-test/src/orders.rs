//! Hand-built order scenarios.

use loadforge_core::{CapacityLimits, Order, OrderCatalog};

/// Limits of 100 weight, 100 volume, 10 pallets.
pub fn small_limits() -> CapacityLimits {
    CapacityLimits::new(100.0, 100.0, 10.0).expect("positive limits")
}

/// Three orders where greedy and optimum both need two containers.
///
/// Greedy places order 1 then order 3 into container 0 and order 2 alone
/// into container 1.
pub fn scenario_a() -> OrderCatalog {
    OrderCatalog::new(
        vec![
            Order::new(1, 60.0, 10.0, 1.0),
            Order::new(2, 50.0, 10.0, 1.0),
            Order::new(3, 10.0, 10.0, 1.0),
        ],
        small_limits(),
    )
    .expect("valid scenario")
}

/// Weights 5, 4, 3, 3, 3, 2 against a weight limit of 10.
///
/// First-fit-decreasing opens three containers (`{5,4}`, `{3,3,3}`, `{2}`)
/// while two suffice (`{5,3,2}`, `{4,3,3}`).
pub fn ffd_trap() -> OrderCatalog {
    let limits = CapacityLimits::new(10.0, 100.0, 10.0).expect("positive limits");
    OrderCatalog::new(
        vec![
            Order::new(1, 5.0, 1.0, 1.0),
            Order::new(2, 4.0, 1.0, 1.0),
            Order::new(3, 3.0, 1.0, 1.0),
            Order::new(4, 3.0, 1.0, 1.0),
            Order::new(5, 3.0, 1.0, 1.0),
            Order::new(6, 2.0, 1.0, 1.0),
        ],
        limits,
    )
    .expect("valid scenario")
}

/// Orders that each fill a container in exactly one dimension.
pub fn one_per_dimension() -> OrderCatalog {
    OrderCatalog::new(
        vec![
            Order::new(1, 100.0, 0.0, 0.0),
            Order::new(2, 0.0, 100.0, 0.0),
            Order::new(3, 0.0, 0.0, 10.0),
        ],
        small_limits(),
    )
    .expect("valid scenario")
}

/// A realistic load under the default limits.
pub fn default_limits_batch() -> OrderCatalog {
    OrderCatalog::new(
        vec![
            Order::new(1001, 18_000.0, 1_200.0, 22.0),
            Order::new(1002, 12_500.0, 900.0, 16.0),
            Order::new(1003, 21_000.0, 1_500.0, 26.0),
            Order::new(1004, 6_000.0, 400.0, 8.0),
            Order::new(1005, 9_500.0, 700.0, 12.0),
            Order::new(1006, 15_000.0, 1_100.0, 20.0),
            Order::new(1007, 3_200.0, 250.0, 4.0),
        ],
        CapacityLimits::default(),
    )
    .expect("valid scenario")
}
