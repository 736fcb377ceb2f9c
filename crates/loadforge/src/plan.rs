//! Entry points that hide the planner wiring.

use loadforge_config::{BackendType, PlannerConfig};
use loadforge_core::{Order, OrderCatalog};
use loadforge_solver::{
    BranchAndBound, DeadlineBackend, Incumbent, PlanError, PlanOutcome, Planner, SolverBackend,
};
use tokio::sync::mpsc;
use tracing::warn;

/// Configuration file read by [`plan_orders`] from the working directory.
pub const CONFIG_FILE: &str = "loadforge.toml";

/// Plans orders with the settings in [`CONFIG_FILE`], or defaults when the
/// file is missing or unreadable.
pub fn plan_orders(orders: impl IntoIterator<Item = Order>) -> Result<PlanOutcome, PlanError> {
    let config = PlannerConfig::load(CONFIG_FILE).unwrap_or_default();
    plan_orders_with(orders, &config)
}

/// Plans orders with an explicit configuration.
///
/// # Errors
///
/// Returns an error for invalid limits, an order beyond the limits or a
/// duplicate order id. Solver failures fall back to the greedy plan.
pub fn plan_orders_with(
    orders: impl IntoIterator<Item = Order>,
    config: &PlannerConfig,
) -> Result<PlanOutcome, PlanError> {
    #[cfg(feature = "console")]
    crate::console::init();

    let catalog = OrderCatalog::new(orders, config.capacity_limits()?)?;
    Planner::from_config(config)?.plan(&catalog)
}

/// Plans orders and sends every improved exact solution to `sender`.
///
/// Streaming needs the built-in branch-and-bound backend; any other
/// configured backend is replaced by it.
pub fn plan_orders_streaming(
    orders: impl IntoIterator<Item = Order>,
    config: &PlannerConfig,
    sender: mpsc::UnboundedSender<Incumbent>,
) -> Result<PlanOutcome, PlanError> {
    #[cfg(feature = "console")]
    crate::console::init();

    config.validate()?;
    if config.exact.backend != BackendType::BranchAndBound {
        warn!(
            event = "backend_replaced",
            configured = %config.exact.backend,
            used = "BranchAndBound",
        );
    }
    let catalog = OrderCatalog::new(orders, config.capacity_limits()?)?;

    let backend = BranchAndBound::new().with_incumbent_sender(sender);
    let backend: Box<dyn SolverBackend> = match config.exact.termination.wait_limit() {
        Some(wait) => Box::new(DeadlineBackend::new(backend, wait)),
        None => Box::new(backend),
    };
    Planner::new(backend, config.exact.clone()).plan(&catalog)
}
