//! Tunables for the canvas, grouped by the component that reads them.
//!
//! Every group has a `Default` matching the stock visualizer, so a host only
//! needs to supply the values it wants to change.

use crate::measure::TextMetrics;
use crate::viewport::ZoomAnchor;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0} must be positive")]
    NonPositive(&'static str),
    #[error("Invalid config: {field} must be {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Invalid config: min_scale {min} exceeds max_scale {max}")]
    ScaleRange { min: f64, max: f64 },
    #[error("Invalid config: layout table size {layout:?} differs from node size {node:?}")]
    SizeMismatch { layout: (f64, f64), node: (f64, f64) },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub layout: LayoutConfig,
    pub node: NodeConfig,
    pub viewport: ViewportConfig,
    pub interaction: InteractionConfig,
    pub text: TextMetrics,
}

/// Parameters of the tiered radial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Footprint reserved per table. Not read from JSON: it always mirrors
    /// `node.default_width` and `node.default_height`.
    #[serde(skip)]
    pub table_width: f64,
    #[serde(skip)]
    pub table_height: f64,
    pub min_gap: f64,
    /// Extra radius added per outer tier.
    pub tier_spacing: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            table_width: 280.0,
            table_height: 400.0,
            min_gap: 100.0,
            tier_spacing: 600.0,
            center_x: 1500.0,
            center_y: 1200.0,
        }
    }
}

/// Node box geometry, in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub header_height: f64,
    pub row_height: f64,
    /// Foreign key section height is `fk_section_base + fk_row_height * n`.
    pub fk_section_base: f64,
    pub fk_row_height: f64,
    pub body_padding: f64,
    /// Vertical offset of relationship anchors from the node's top edge.
    pub anchor_offset_y: f64,
    pub resize_handle: f64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            default_width: 280.0,
            default_height: 400.0,
            min_width: 280.0,
            min_height: 200.0,
            header_height: 50.0,
            row_height: 28.0,
            fk_section_base: 40.0,
            fk_row_height: 35.0,
            body_padding: 20.0,
            anchor_offset_y: 30.0,
            resize_handle: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub zoom_anchor: ZoomAnchor,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 3.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            zoom_anchor: ZoomAnchor::Origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    /// Maximum gap between two clicks on the same node to count as a
    /// double-click.
    pub double_click_ms: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 300.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let mut config: ViewerConfig = serde_json::from_str(input)?;
        config.layout.table_width = config.node.default_width;
        config.layout.table_height = config.node.default_height;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("layout.table_width", self.layout.table_width),
            ("layout.table_height", self.layout.table_height),
            ("node.default_width", self.node.default_width),
            ("node.default_height", self.node.default_height),
            ("node.min_width", self.node.min_width),
            ("node.min_height", self.node.min_height),
            ("node.row_height", self.node.row_height),
            ("viewport.min_scale", self.viewport.min_scale),
            ("text.char_width", self.text.char_width),
        ];
        for (field, value) in positive {
            // NaN fails this check as well.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(field));
            }
        }

        let ranges = [
            ("layout.min_gap", ">= 0", self.layout.min_gap >= 0.0),
            ("layout.tier_spacing", ">= 0", self.layout.tier_spacing >= 0.0),
            ("viewport.zoom_in_factor", "> 1", self.viewport.zoom_in_factor > 1.0),
            (
                "viewport.zoom_out_factor",
                "in (0, 1)",
                self.viewport.zoom_out_factor > 0.0 && self.viewport.zoom_out_factor < 1.0,
            ),
            (
                "interaction.double_click_ms",
                ">= 0",
                self.interaction.double_click_ms >= 0.0,
            ),
        ];
        for (field, expected, ok) in ranges {
            if !ok {
                return Err(ConfigError::OutOfRange { field, expected });
            }
        }

        let layout = (self.layout.table_width, self.layout.table_height);
        let node = (self.node.default_width, self.node.default_height);
        if layout != node {
            return Err(ConfigError::SizeMismatch { layout, node });
        }

        if self.viewport.min_scale > self.viewport.max_scale {
            return Err(ConfigError::ScaleRange {
                min: self.viewport.min_scale,
                max: self.viewport.max_scale,
            });
        }
        Ok(())
    }
}
