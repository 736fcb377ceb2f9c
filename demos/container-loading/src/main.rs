//! Plans a day of outbound orders onto trailers.
//!
//! Run from this directory so `loadforge.toml` is picked up:
//!
//! ```text
//! cargo run -p container-loading
//! ```

use loadforge::prelude::*;

fn outbound_orders() -> Vec<Order> {
    let rows: [(u64, f64, f64, f64); 12] = [
        (101, 9_800.0, 520.0, 12.0),
        (102, 7_400.0, 410.0, 10.0),
        (103, 6_100.0, 380.0, 9.0),
        (104, 5_900.0, 300.0, 8.0),
        (105, 4_800.0, 290.0, 7.0),
        (106, 4_500.0, 260.0, 6.0),
        (107, 3_900.0, 240.0, 6.0),
        (108, 3_200.0, 180.0, 5.0),
        (109, 2_600.0, 150.0, 4.0),
        (110, 2_100.0, 120.0, 3.0),
        (111, 1_500.0, 90.0, 2.0),
        (112, 900.0, 60.0, 1.0),
    ];
    rows.iter()
        .map(|&(id, weight, volume, pallets)| Order::new(id, weight, volume, pallets))
        .collect()
}

fn main() {
    let outcome = match plan_orders(outbound_orders()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("planning failed: {e}");
            std::process::exit(1);
        }
    };

    for (index, container) in outcome.assignment().containers().iter().enumerate() {
        let ids: Vec<String> = container.iter().map(ToString::to_string).collect();
        println!("trailer {index}: {}", ids.join(" "));
    }
    println!(
        "{} trailers ({}, greedy {}, lower bound {})",
        outcome.container_count(),
        outcome.source(),
        outcome.greedy_container_count(),
        outcome.lower_bound()
    );
}
