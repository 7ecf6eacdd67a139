//! Data structures for layout results.

use crate::geometry::Point;
use std::collections::HashMap;

/// A table placed by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub name: String,
    /// 0 is the innermost row; higher tiers are rings further out.
    pub tier: usize,
    /// Top-left corner in world coordinates.
    pub position: Point,
}

/// The complete layout result, in connectivity rank order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub tier_sizes: Vec<usize>,
}

impl Layout {
    pub fn position(&self, name: &str) -> Option<Point> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.position)
    }

    /// Positions keyed by table name.
    pub fn positions(&self) -> HashMap<String, Point> {
        self.nodes
            .iter()
            .map(|n| (n.name.clone(), n.position))
            .collect()
    }
}
