//! Mutable canvas state: node positions, node sizes and the viewport.
//!
//! One `CanvasState` belongs to one schema view. The interaction controller
//! writes it, the scene builder reads it; nothing else holds layout state.

use crate::config::NodeConfig;
use crate::geometry::{Point, Rect, Size};
use crate::interaction::PointerTarget;
use crate::layout::Layout;
use crate::schema::Schema;
use crate::viewport::Viewport;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    positions: HashMap<String, Point>,
    // Sparse: only tables the user resized.
    sizes: HashMap<String, Size>,
    pub viewport: Viewport,
}

impl CanvasState {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            positions: layout.positions(),
            sizes: HashMap::new(),
            viewport: Viewport::default(),
        }
    }

    /// Discard manual edits: new positions, default sizes, identity viewport.
    pub fn reset(&mut self, layout: &Layout) {
        *self = Self::from_layout(layout);
    }

    pub fn position(&self, table: &str) -> Option<Point> {
        self.positions.get(table).copied()
    }

    pub fn set_position(&mut self, table: &str, position: Point) {
        if let Some(p) = self.positions.get_mut(table) {
            *p = position;
        }
    }

    pub fn size(&self, table: &str, node: &NodeConfig) -> Size {
        self.sizes
            .get(table)
            .copied()
            .unwrap_or(Size::new(node.default_width, node.default_height))
    }

    pub fn explicit_size(&self, table: &str) -> Option<Size> {
        self.sizes.get(table).copied()
    }

    pub fn set_size(&mut self, table: &str, size: Size) {
        self.sizes.insert(table.to_string(), size);
    }

    /// World-space box of a placed table.
    pub fn node_rect(&self, table: &str, node: &NodeConfig) -> Option<Rect> {
        self.position(table)
            .map(|p| Rect::from_origin(p, self.size(table, node)))
    }

    /// Classify a screen point. Later tables are drawn on top, so they are
    /// tested first.
    pub fn hit_test(&self, screen: Point, schema: &Schema, node: &NodeConfig) -> PointerTarget {
        let world = self.viewport.screen_to_world(screen);

        for table in schema.tables().iter().rev() {
            let Some(rect) = self.node_rect(&table.name, node) else {
                continue;
            };
            if !rect.contains(world) {
                continue;
            }

            let handle = Rect {
                x: rect.right() - node.resize_handle,
                y: rect.bottom() - node.resize_handle,
                width: node.resize_handle,
                height: node.resize_handle,
            };
            return if handle.contains(world) {
                PointerTarget::ResizeHandle(table.name.clone())
            } else {
                PointerTarget::Node(table.name.clone())
            };
        }

        PointerTarget::Canvas
    }
}
