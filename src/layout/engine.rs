//! Layout engine core implementation.

use crate::config::LayoutConfig;
use crate::schema::Schema;
use tracing::{debug, info};

use super::placement::{place_ring, place_row};
use super::tiers::{partition, rank_by_connectivity, tier_sizes};
use super::types::{Layout, LayoutNode};

/// Tiered radial layout: the most connected tables form a row at the
/// origin, the rest are spread over concentric rings.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub(crate) config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute an initial position for every table. Pure function of the
    /// schema's table list.
    pub fn layout(&self, schema: &Schema) -> Layout {
        // Phase 1: Rank by connectivity
        let ranked = rank_by_connectivity(schema);

        // Phase 2: Tier partition
        let sizes = tier_sizes(ranked.len());
        let tiers = partition(&ranked, &sizes);

        // Phase 3: Placement
        let mut nodes = Vec::with_capacity(ranked.len());
        for (tier, tables) in tiers.iter().enumerate() {
            let positions = if tier == 0 {
                place_row(tables.len(), &self.config)
            } else {
                place_ring(tier, tables.len(), &self.config)
            };
            debug!(tier, count = tables.len(), "placed tier");

            nodes.extend(tables.iter().zip(positions).map(|(table, position)| LayoutNode {
                name: table.name.clone(),
                tier,
                position,
            }));
        }

        info!(tables = nodes.len(), tiers = sizes.len(), "layout computed");

        Layout {
            nodes,
            tier_sizes: sizes,
        }
    }
}
