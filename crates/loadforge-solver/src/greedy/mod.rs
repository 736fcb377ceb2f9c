//! Greedy first-fit-decreasing packer.
//!
//! Orders are placed by descending combined metric. Each order goes into the
//! first open container (by opening order) that still has room on all three
//! dimensions; otherwise a new container is opened for it.

use std::collections::HashMap;
use std::time::Instant;

use loadforge_core::{
    placement_order, Assignment, CapacityLimits, Container, OrderCatalog, OrderId, Result,
    ScoredOrder,
};
use tracing::{debug, info};

/// Packs scored orders into containers with first-fit decreasing.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPacker {
    limits: CapacityLimits,
}

impl GreedyPacker {
    pub fn new(limits: CapacityLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &CapacityLimits {
        &self.limits
    }

    /// Scores and packs every order of a catalog.
    pub fn pack_catalog(&self, catalog: &OrderCatalog) -> Result<GreedyPlan> {
        self.pack(&catalog.scored())
    }

    /// Packs the given scored orders.
    ///
    /// Every order is checked against the limits before the first container
    /// is opened, so an oversized order fails the whole call with
    /// [`LoadForgeError::InfeasibleOrder`](loadforge_core::LoadForgeError::InfeasibleOrder).
    ///
    /// The result is deterministic: ties in the metric keep input order.
    pub fn pack(&self, scored: &[ScoredOrder]) -> Result<GreedyPlan> {
        let start = Instant::now();
        for order in scored {
            self.limits.check_demand(order.id, &order.demand)?;
        }

        info!(event = "pack_start", order_count = scored.len());

        let sorted = placement_order(scored);
        let mut containers: Vec<Container> = Vec::new();

        for order in &sorted {
            let slot = containers.iter().position(|c| c.can_fit(&order.demand));
            let container = match slot {
                Some(index) => &mut containers[index],
                None => {
                    let index = containers.len();
                    containers.push(Container::open(index, &self.limits));
                    debug!(
                        event = "container_opened",
                        container = index,
                        order = %order.id,
                        metric = order.metric,
                    );
                    &mut containers[index]
                }
            };
            container.place(order.index, &order.demand);
        }

        let ids: HashMap<usize, OrderId> = scored.iter().map(|s| (s.index, s.id)).collect();
        let assignment = Assignment::from_containers(
            containers
                .iter()
                .map(|c| c.orders().iter().map(|index| ids[index]).collect::<Vec<_>>()),
        )?;

        info!(
            event = "pack_end",
            containers = containers.len(),
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(GreedyPlan {
            containers,
            assignment,
            placement: sorted.iter().map(|s| s.id).collect(),
        })
    }
}

/// Result of a greedy packing pass.
#[derive(Debug, Clone)]
pub struct GreedyPlan {
    containers: Vec<Container>,
    assignment: Assignment,
    placement: Vec<OrderId>,
}

impl GreedyPlan {
    /// Containers in opening order, with their remaining capacity.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Order ids in the sequence they were placed.
    pub fn placement_order(&self) -> &[OrderId] {
        &self.placement
    }
}
