//! Seeded random catalogs.

use loadforge_core::{CapacityLimits, Order, OrderCatalog};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates `count` orders whose demands stay within `max_fraction` of each
/// limit. Pallet counts are whole numbers.
///
/// The same seed always produces the same catalog.
///
/// ```
/// use loadforge_test::orders::small_limits;
/// use loadforge_test::random::random_catalog;
///
/// let a = random_catalog(7, 5, small_limits(), 0.6);
/// let b = random_catalog(7, 5, small_limits(), 0.6);
/// assert_eq!(a.orders(), b.orders());
/// ```
pub fn random_catalog(
    seed: u64,
    count: usize,
    limits: CapacityLimits,
    max_fraction: f64,
) -> OrderCatalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let fraction = max_fraction.clamp(0.01, 1.0);
    let max_pallets = (limits.max_pallets() * fraction).floor().max(1.0) as u32;

    let orders: Vec<Order> = (0..count)
        .map(|i| {
            let weight = rng.random_range(0.0..=limits.max_weight() * fraction);
            let volume = rng.random_range(0.0..=limits.max_volume() * fraction);
            let pallets = rng.random_range(0..=max_pallets) as f64;
            Order::new(i as u64 + 1, weight.floor(), volume.floor(), pallets)
        })
        .collect();

    OrderCatalog::new(orders, limits).expect("generated demands stay within limits")
}
