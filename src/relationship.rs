//! Curved foreign-key edges between table nodes.

use crate::canvas::CanvasState;
use crate::config::NodeConfig;
use crate::geometry::{Point, Rect};
use crate::schema::Schema;
use crate::viewport::Viewport;
use serde::Serialize;
use tracing::debug;

const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 3.0;

/// A foreign key drawn as a horizontal S-shaped cubic Bézier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEdge {
    pub from_table: String,
    pub to_table: String,
    pub columns: Vec<String>,
    pub foreign_columns: Vec<String>,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Arrowhead triangle: tip, then the two base corners.
    pub arrow: [Point; 3],
}

impl RelationshipEdge {
    /// Leave the source's right edge and enter the target's left edge, both
    /// `anchor_offset_y` below the node's top.
    pub fn between(
        from_table: &str,
        to_table: &str,
        source: Rect,
        target: Rect,
        anchor_offset_y: f64,
    ) -> Self {
        let start = Point::new(source.right(), source.y + anchor_offset_y);
        let end = Point::new(target.x, target.y + anchor_offset_y);
        let mid_x = (start.x + end.x) / 2.0;
        let control1 = Point::new(mid_x, start.y);
        let control2 = Point::new(mid_x, end.y);

        Self {
            from_table: from_table.to_string(),
            to_table: to_table.to_string(),
            columns: Vec::new(),
            foreign_columns: Vec::new(),
            start,
            control1,
            control2,
            end,
            arrow: arrow_head(control2, end),
        }
    }

    /// The same edge mapped into screen space.
    pub fn to_screen(&self, viewport: &Viewport) -> Self {
        let map = |p: Point| viewport.world_to_screen(p);
        Self {
            start: map(self.start),
            control1: map(self.control1),
            control2: map(self.control2),
            end: map(self.end),
            arrow: self.arrow.map(map),
            ..self.clone()
        }
    }

    /// SVG path data.
    pub fn path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.start.x + b1 * self.control1.x + b2 * self.control2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.control1.y + b2 * self.control2.y + b3 * self.end.y,
        )
    }
}

fn arrow_head(from: Point, tip: Point) -> [Point; 3] {
    let d = tip - from;
    let len = d.x.hypot(d.y);
    // Degenerate tangent (anchors stacked vertically): point right.
    let (ux, uy) = if len > f64::EPSILON {
        (d.x / len, d.y / len)
    } else {
        (1.0, 0.0)
    };

    let base = Point::new(tip.x - ux * ARROW_LENGTH, tip.y - uy * ARROW_LENGTH);
    let normal = Point::new(-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
    [tip, base + normal, base - normal]
}

/// World-space edges for every foreign key whose two tables are placed.
pub fn route_relationships(
    schema: &Schema,
    canvas: &CanvasState,
    node: &NodeConfig,
) -> Vec<RelationshipEdge> {
    let mut edges = Vec::new();

    for table in schema.tables() {
        let Some(source) = canvas.node_rect(&table.name, node) else {
            continue;
        };

        for fk in &table.foreign_keys {
            let Some(target) = canvas.node_rect(&fk.foreign_table, node) else {
                debug!(
                    table = %table.name,
                    foreign_table = %fk.foreign_table,
                    "skipping edge to unknown table"
                );
                continue;
            };

            let mut edge = RelationshipEdge::between(
                &table.name,
                &fk.foreign_table,
                source,
                target,
                node.anchor_offset_y,
            );
            edge.columns = fk.columns.clone();
            edge.foreign_columns = fk.foreign_columns.clone();
            edges.push(edge);
        }
    }

    edges
}
