//! Pointer-driven state machine for panning, dragging and resizing.
//!
//! Pointer down/move/up drive the machine. Wheel zoom is handled outside
//! it and is legal in every state.

use crate::canvas::CanvasState;
use crate::config::{InteractionConfig, NodeConfig, ViewportConfig};
use crate::geometry::{Point, Size};
use crate::viewport::ZoomDirection;
use tracing::{debug, warn};

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    Node(String),
    ResizeHandle(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    PanningCanvas {
        /// Pointer position minus pan offset at drag start.
        origin: Point,
    },
    DraggingNode {
        table: String,
        /// World-space vector from the node origin to the pointer.
        anchor_offset: Point,
    },
    ResizingNode {
        table: String,
        start_size: Size,
        start_pointer: Point,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn mode(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::PanningCanvas { .. } => "panning",
            InteractionState::DraggingNode { .. } => "dragging",
            InteractionState::ResizingNode { .. } => "resizing",
        }
    }
}

/// Side effects the host must act on.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Open the detail view for a table.
    SelectTable(String),
}

#[derive(Debug, Clone, PartialEq)]
struct LastClick {
    table: String,
    time_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    last_click: Option<LastClick>,
    config: InteractionConfig,
    node: NodeConfig,
    viewport: ViewportConfig,
}

impl InteractionController {
    pub fn new(config: InteractionConfig, node: NodeConfig, viewport: ViewportConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            last_click: None,
            config,
            node,
            viewport,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Forget any in-progress interaction and click history.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.last_click = None;
    }

    pub fn pointer_down(
        &mut self,
        canvas: &CanvasState,
        pointer: Point,
        target: PointerTarget,
        time_ms: f64,
    ) -> Option<InteractionEvent> {
        if !self.state.is_idle() {
            warn!(mode = self.state.mode(), "pointer down while interaction active, ignored");
            return None;
        }

        match target {
            PointerTarget::Canvas => {
                self.last_click = None;
                let pan = Point::new(canvas.viewport.pan_x, canvas.viewport.pan_y);
                self.state = InteractionState::PanningCanvas {
                    origin: pointer - pan,
                };
            }
            PointerTarget::Node(table) => {
                if self.is_double_click(&table, time_ms) {
                    self.last_click = None;
                    debug!(table = %table, "double click");
                    return Some(InteractionEvent::SelectTable(table));
                }

                let Some(position) = canvas.position(&table) else {
                    debug!(table = %table, "pointer down on unplaced table");
                    return None;
                };
                self.last_click = Some(LastClick {
                    table: table.clone(),
                    time_ms,
                });
                let anchor_offset = canvas.viewport.screen_to_world(pointer) - position;
                self.state = InteractionState::DraggingNode {
                    table,
                    anchor_offset,
                };
            }
            PointerTarget::ResizeHandle(table) => {
                self.last_click = None;
                if canvas.position(&table).is_none() {
                    return None;
                }
                let start_size = canvas.size(&table, &self.node);
                self.state = InteractionState::ResizingNode {
                    table,
                    start_size,
                    start_pointer: pointer,
                };
            }
        }

        debug!(mode = self.state.mode(), "interaction started");
        None
    }

    pub fn pointer_move(&mut self, canvas: &mut CanvasState, pointer: Point) {
        match &self.state {
            InteractionState::Idle => {}
            InteractionState::PanningCanvas { origin } => {
                let target = pointer - *origin;
                let dx = target.x - canvas.viewport.pan_x;
                let dy = target.y - canvas.viewport.pan_y;
                canvas.viewport.apply_pan(dx, dy);
            }
            InteractionState::DraggingNode {
                table,
                anchor_offset,
            } => {
                let world = canvas.viewport.screen_to_world(pointer);
                canvas.set_position(table, world - *anchor_offset);
            }
            InteractionState::ResizingNode {
                table,
                start_size,
                start_pointer,
            } => {
                let scale = canvas.viewport.scale;
                let width = (start_size.width + (pointer.x - start_pointer.x) / scale)
                    .max(self.node.min_width);
                let height = (start_size.height + (pointer.y - start_pointer.y) / scale)
                    .max(self.node.min_height);
                canvas.set_size(table, Size::new(width, height));
            }
        }
    }

    pub fn pointer_up(&mut self) {
        if !self.state.is_idle() {
            debug!(mode = self.state.mode(), "interaction finished");
        }
        self.state = InteractionState::Idle;
    }

    /// Zoom by one step. Independent of the pointer state machine.
    pub fn wheel(&mut self, canvas: &mut CanvasState, delta_y: f64, pointer: Option<Point>) {
        let direction = ZoomDirection::from_wheel_delta(delta_y);
        canvas.viewport.apply_zoom(direction, pointer, &self.viewport);
    }

    fn is_double_click(&self, table: &str, time_ms: f64) -> bool {
        match &self.last_click {
            Some(last) => {
                last.table == table
                    && time_ms >= last.time_ms
                    && time_ms - last.time_ms < self.config.double_click_ms
            }
            None => false,
        }
    }
}
