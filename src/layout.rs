//! Initial placement of table nodes on the world plane.

mod engine;
mod placement;
mod tiers;
mod types;

pub use engine::LayoutEngine;
pub use placement::{angle_offset, ring_radius};
pub use tiers::{rank_by_connectivity, tier_sizes};
pub use types::{Layout, LayoutNode};
