//! The schema viewer: one schema, its canvas state and the controller that
//! mutates it.

use crate::canvas::CanvasState;
use crate::config::{ConfigError, ViewerConfig};
use crate::geometry::Point;
use crate::interaction::{InteractionController, InteractionEvent, InteractionState, PointerTarget};
use crate::layout::LayoutEngine;
use crate::scene::{Scene, build_scene};
use crate::schema::{Schema, SchemaError};
use crate::svg::SvgRenderer;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct SchemaViewer {
    schema: Schema,
    config: ViewerConfig,
    engine: LayoutEngine,
    canvas: CanvasState,
    controller: InteractionController,
}

impl SchemaViewer {
    pub fn new(schema: Schema, config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let engine = LayoutEngine::new(config.layout.clone());
        let canvas = CanvasState::from_layout(&engine.layout(&schema));
        let controller = InteractionController::new(
            config.interaction.clone(),
            config.node.clone(),
            config.viewport.clone(),
        );
        info!(tables = schema.len(), "schema viewer ready");

        Ok(Self {
            schema,
            config,
            engine,
            canvas,
            controller,
        })
    }

    /// Load a schema (and optionally a config) from JSON.
    pub fn from_json(schema_json: &str, config_json: Option<&str>) -> Result<Self, ViewerError> {
        let schema = Schema::from_json(schema_json)?;
        let config = match config_json {
            Some(json) => ViewerConfig::from_json(json)?,
            None => ViewerConfig::default(),
        };
        Ok(Self::new(schema, config)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn interaction(&self) -> &InteractionState {
        self.controller.state()
    }

    pub fn hit_test(&self, screen: Point) -> PointerTarget {
        self.canvas.hit_test(screen, &self.schema, &self.config.node)
    }

    /// Pointer down at a screen point; the target is found by hit testing.
    pub fn pointer_down(&mut self, screen: Point, time_ms: f64) -> Option<InteractionEvent> {
        let target = self.hit_test(screen);
        self.pointer_down_on(screen, target, time_ms)
    }

    /// Pointer down with a target the host already resolved.
    pub fn pointer_down_on(
        &mut self,
        screen: Point,
        target: PointerTarget,
        time_ms: f64,
    ) -> Option<InteractionEvent> {
        self.controller
            .pointer_down(&self.canvas, screen, target, time_ms)
    }

    pub fn pointer_move(&mut self, screen: Point) {
        self.controller.pointer_move(&mut self.canvas, screen);
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f64, pointer: Option<Point>) {
        self.controller.wheel(&mut self.canvas, delta_y, pointer);
    }

    /// Recompute the layout and drop every manual edit.
    pub fn reset_layout(&mut self) {
        let layout = self.engine.layout(&self.schema);
        self.canvas.reset(&layout);
        self.controller.reset();
        info!("layout reset");
    }

    pub fn scene(&self) -> Scene {
        build_scene(&self.schema, &self.canvas, &self.config)
    }

    pub fn render_svg(&self, width: f64, height: f64) -> String {
        SvgRenderer::new(self.config.node.clone(), self.config.text.padding_x).render(
            &self.scene(),
            width,
            height,
        )
    }
}
