pub mod canvas;
pub mod config;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod measure;
pub mod relationship;
pub mod scene;
pub mod schema;
pub mod svg;
pub mod viewer;
pub mod viewport;

use wasm_bindgen::prelude::*;

use geometry::Point;
pub use viewer::{SchemaViewer, ViewerError};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Lay out a schema and render it to SVG in one call.
#[wasm_bindgen(js_name = "schemaToSvg")]
pub fn render_schema(
    schema_json: &str,
    config_json: Option<String>,
    width: f64,
    height: f64,
) -> Result<String, String> {
    let viewer =
        SchemaViewer::from_json(schema_json, config_json.as_deref()).map_err(|e| e.to_string())?;
    Ok(viewer.render_svg(width, height))
}

/// Browser-facing wrapper around [`SchemaViewer`]. Coordinates are screen
/// pixels relative to the canvas element.
#[wasm_bindgen(js_name = "SchemaViewer")]
pub struct WasmSchemaViewer {
    inner: SchemaViewer,
}

#[wasm_bindgen(js_class = "SchemaViewer")]
impl WasmSchemaViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(schema_json: &str, config_json: Option<String>) -> Result<WasmSchemaViewer, String> {
        let inner = SchemaViewer::from_json(schema_json, config_json.as_deref())
            .map_err(|e| e.to_string())?;
        Ok(Self { inner })
    }

    /// Returns the table name when the press completes a double-click.
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, y: f64, time_ms: f64) -> Option<String> {
        self.inner
            .pointer_down(Point::new(x, y), time_ms)
            .map(|event| match event {
                interaction::InteractionEvent::SelectTable(name) => name,
            })
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
        self.inner.wheel(delta_y, Some(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = "resetLayout")]
    pub fn reset_layout(&mut self) {
        self.inner.reset_layout();
    }

    #[wasm_bindgen(js_name = "interactionMode")]
    pub fn interaction_mode(&self) -> String {
        self.inner.interaction().mode().to_string()
    }

    #[wasm_bindgen(js_name = "sceneJson")]
    pub fn scene_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.inner.scene()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "renderSvg")]
    pub fn render_svg(&self, width: f64, height: f64) -> String {
        self.inner.render_svg(width, height)
    }

    #[wasm_bindgen(js_name = "tableNames")]
    pub fn table_names(&self) -> js_sys::Array {
        self.inner
            .schema()
            .tables()
            .iter()
            .map(|t| JsValue::from_str(&t.name))
            .collect()
    }
}
