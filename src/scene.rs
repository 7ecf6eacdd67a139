//! Per-frame draw instructions composed from schema, canvas state and
//! viewport.

use crate::canvas::CanvasState;
use crate::config::{NodeConfig, ViewerConfig};
use crate::geometry::Rect;
use crate::measure::TextMetrics;
use crate::relationship::{RelationshipEdge, route_relationships};
use crate::schema::{ForeignKey, Schema, Table};
use crate::viewport::Viewport;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    /// Name truncated to fit the node.
    pub label: String,
    pub type_label: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub name: String,
    pub title: String,
    pub world: Rect,
    pub screen: Rect,
    pub primary_key: Option<String>,
    pub columns: Vec<ColumnView>,
    /// Columns that did not fit; drawn as "+N more".
    pub hidden_columns: usize,
    pub foreign_keys: Vec<String>,
}

impl NodeView {
    pub fn more_label(&self) -> Option<String> {
        (self.hidden_columns > 0).then(|| format!("+{} more", self.hidden_columns))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub world: RelationshipEdge,
    pub screen: RelationshipEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Height of the foreign key list at the bottom of a node.
pub fn fk_section_height(fk_count: usize, node: &NodeConfig) -> f64 {
    if fk_count == 0 {
        0.0
    } else {
        node.fk_section_base + node.fk_row_height * fk_count as f64
    }
}

/// How many column rows fit in a node of the given height.
pub fn visible_row_capacity(height: f64, fk_count: usize, node: &NodeConfig) -> usize {
    let available =
        height - node.header_height - fk_section_height(fk_count, node) - node.body_padding;
    if available <= 0.0 {
        0
    } else {
        (available / node.row_height).floor() as usize
    }
}

pub fn describe_foreign_key(fk: &ForeignKey) -> String {
    format!(
        "{} → {}({})",
        fk.columns.join(", "),
        fk.foreign_table,
        fk.foreign_columns.join(", ")
    )
}

fn column_views(table: &Table, capacity: usize, width: f64, text: &TextMetrics) -> Vec<ColumnView> {
    let primary = table.primary_index();
    let inner = text.inner_width(width);

    table
        .columns
        .iter()
        .take(capacity)
        .map(|c| {
            let type_label = text.fit(&c.typ, inner / 2.0);
            let name_room = (inner - text.text_width(&type_label) - text.char_width * 2.0).max(0.0);
            ColumnView {
                name: c.name.clone(),
                typ: c.typ.clone(),
                label: text.fit(&c.name, name_room),
                type_label,
                is_primary_key: primary.is_some_and(|i| i.columns.contains(&c.name)),
                is_foreign_key: table.is_foreign_key_column(&c.name),
                nullable: c.nullable,
            }
        })
        .collect()
}

pub fn node_view(
    table: &Table,
    world: Rect,
    viewport: &Viewport,
    config: &ViewerConfig,
) -> NodeView {
    let capacity = visible_row_capacity(world.height, table.foreign_keys.len(), &config.node);
    let columns = column_views(table, capacity, world.width, &config.text);
    let hidden_columns = table.columns.len() - columns.len();

    NodeView {
        name: table.name.clone(),
        title: config.text.fit(&table.name, config.text.inner_width(world.width)),
        world,
        screen: viewport.rect_to_screen(world),
        primary_key: table.primary_key_column().map(str::to_string),
        columns,
        hidden_columns,
        foreign_keys: table.foreign_keys.iter().map(describe_foreign_key).collect(),
    }
}

/// Everything the host needs to draw one frame. Cheap enough to rebuild on
/// every state change.
pub fn build_scene(schema: &Schema, canvas: &CanvasState, config: &ViewerConfig) -> Scene {
    let viewport = canvas.viewport;

    let nodes = schema
        .tables()
        .iter()
        .filter_map(|t| {
            canvas
                .node_rect(&t.name, &config.node)
                .map(|rect| node_view(t, rect, &viewport, config))
        })
        .collect();

    let edges = route_relationships(schema, canvas, &config.node)
        .into_iter()
        .map(|world| EdgeView {
            screen: world.to_screen(&viewport),
            world,
        })
        .collect();

    Scene {
        viewport,
        nodes,
        edges,
    }
}
