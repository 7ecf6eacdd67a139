use crate::config::NodeConfig;
use crate::scene::{EdgeView, NodeView, Scene, fk_section_height};
use std::fmt::Write;

pub struct SvgRenderer {
    node: NodeConfig,
    padding_x: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(NodeConfig::default(), 12.0)
    }
}

impl SvgRenderer {
    pub fn new(node: NodeConfig, padding_x: f64) -> Self {
        Self { node, padding_x }
    }

    /// Render a scene onto a `width` x `height` surface. Content is drawn in
    /// world units under the viewport transform.
    pub fn render(&self, scene: &Scene, width: f64, height: f64) -> String {
        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .table-bg {{ fill: #fff; }}
  .table-header {{ fill: #eef2f7; }}
  .table-border {{ fill: none; stroke: #4b5563; stroke-width: 1.5; }}
  .table-name {{ font-family: monospace; font-size: 14px; font-weight: bold; }}
  .column-text {{ font-family: monospace; font-size: 12px; }}
  .column-type {{ font-family: monospace; font-size: 11px; fill: #6b7280; }}
  .pk {{ font-weight: bold; }}
  .fk {{ font-style: italic; }}
  .more {{ font-family: monospace; font-size: 11px; fill: #6b7280; }}
  .fk-text {{ font-family: monospace; font-size: 11px; fill: #374151; }}
  .edge {{ stroke: #4b5563; stroke-width: 1.5; fill: none; }}
  .resize-handle {{ fill: #9ca3af; }}
</style>"#
        )
        .unwrap();

        writeln!(
            &mut svg,
            r##"<defs><marker id="arrowhead" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto"><polygon points="0 0, 10 3, 0 6" fill="#4b5563" /></marker></defs>"##
        )
        .unwrap();

        writeln!(&mut svg, r#"<g transform="{}">"#, scene.viewport.transform()).unwrap();

        // Edges first (behind nodes)
        for edge in &scene.edges {
            self.render_edge(&mut svg, edge);
        }

        for node in &scene.nodes {
            self.render_node(&mut svg, node);
        }

        writeln!(&mut svg, "</g>").unwrap();
        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_edge(&self, svg: &mut String, edge: &EdgeView) {
        writeln!(
            svg,
            r#"<path class="edge" d="{}" marker-end="url(#arrowhead)" data-from="{}" data-to="{}" />"#,
            edge.world.path(),
            escape_xml(&edge.world.from_table),
            escape_xml(&edge.world.to_table)
        )
        .unwrap();
    }

    fn render_node(&self, svg: &mut String, node: &NodeView) {
        let r = node.world;
        let header_h = self.node.header_height;
        let row_h = self.node.row_height;

        // 1. Background and header
        writeln!(
            svg,
            r#"<rect class="table-bg" x="{}" y="{}" width="{}" height="{}" rx="6" />"#,
            r.x, r.y, r.width, r.height
        )
        .unwrap();
        writeln!(
            svg,
            r#"<rect class="table-header" x="{}" y="{}" width="{}" height="{}" rx="6" />"#,
            r.x, r.y, r.width, header_h
        )
        .unwrap();

        // 2. Table name
        writeln!(
            svg,
            r#"<text class="table-name" x="{}" y="{}">{}</text>"#,
            r.x + self.padding_x,
            r.y + header_h / 2.0 + 5.0,
            escape_xml(&node.title)
        )
        .unwrap();
        writeln!(
            svg,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#4b5563" stroke-width="1" />"##,
            r.x,
            r.y + header_h,
            r.right(),
            r.y + header_h
        )
        .unwrap();

        // 3. Visible columns
        let mut row_y = r.y + header_h + self.node.body_padding / 2.0 + row_h * 0.7;
        for col in &node.columns {
            let mut class = "column-text".to_string();
            if col.is_primary_key {
                class.push_str(" pk");
            }
            if col.is_foreign_key {
                class.push_str(" fk");
            }
            let prefix = if col.is_primary_key { "◆ " } else { "" };

            writeln!(
                svg,
                r#"<text class="{}" x="{}" y="{}">{}{}</text>"#,
                class,
                r.x + self.padding_x,
                row_y,
                prefix,
                escape_xml(&col.label)
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="column-type" x="{}" y="{}" text-anchor="end">{}</text>"#,
                r.right() - self.padding_x,
                row_y,
                escape_xml(&col.type_label)
            )
            .unwrap();
            row_y += row_h;
        }

        if let Some(more) = node.more_label() {
            writeln!(
                svg,
                r#"<text class="more" x="{}" y="{}">{}</text>"#,
                r.x + self.padding_x,
                row_y,
                more
            )
            .unwrap();
        }

        // 4. Foreign key section
        if !node.foreign_keys.is_empty() {
            let top = r.bottom() - fk_section_height(node.foreign_keys.len(), &self.node);
            writeln!(
                svg,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#d1d5db" stroke-width="1" />"##,
                r.x,
                top,
                r.right(),
                top
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="more" x="{}" y="{}">Foreign keys</text>"#,
                r.x + self.padding_x,
                top + 25.0
            )
            .unwrap();
            for (i, fk) in node.foreign_keys.iter().enumerate() {
                writeln!(
                    svg,
                    r#"<text class="fk-text" x="{}" y="{}">{}</text>"#,
                    r.x + self.padding_x,
                    top + self.node.fk_section_base + self.node.fk_row_height * i as f64 + 22.0,
                    escape_xml(fk)
                )
                .unwrap();
            }
        }

        // 5. Border and resize handle (drawn last to be on top)
        writeln!(
            svg,
            r#"<rect class="table-border" x="{}" y="{}" width="{}" height="{}" rx="6" />"#,
            r.x, r.y, r.width, r.height
        )
        .unwrap();
        let h = self.node.resize_handle;
        writeln!(
            svg,
            r#"<path class="resize-handle" d="M {} {} L {} {} L {} {} Z" />"#,
            r.right(),
            r.bottom() - h,
            r.right(),
            r.bottom(),
            r.right() - h,
            r.bottom()
        )
        .unwrap();
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasState;
    use crate::config::ViewerConfig;
    use crate::layout::LayoutEngine;
    use crate::scene::build_scene;
    use crate::schema::tests::table;
    use crate::schema::{Column, Schema};

    fn render(schema: &Schema, canvas: &CanvasState) -> String {
        let scene = build_scene(schema, canvas, &ViewerConfig::default());
        SvgRenderer::default().render(&scene, 1200.0, 800.0)
    }

    #[test]
    fn test_render_basic() {
        let schema = Schema::new(vec![table("users", &[])]).unwrap();
        let canvas = CanvasState::from_layout(&LayoutEngine::default().layout(&schema));
        let svg = render(&schema, &canvas);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("users"));
        assert!(svg.contains(r#"transform="translate(0, 0) scale(1)""#));
        assert!(svg.contains("◆ id"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_with_edges() {
        let schema = Schema::new(vec![table("orders", &["users"]), table("users", &[])]).unwrap();
        let canvas = CanvasState::from_layout(&LayoutEngine::default().layout(&schema));
        let svg = render(&schema, &canvas);

        assert_eq!(svg.matches(r#"class="edge""#).count(), 1);
        assert!(svg.contains(r#"marker-end="url(#arrowhead)""#));
        assert!(svg.contains(r#"data-from="orders" data-to="users""#));
        assert!(svg.contains("Foreign keys"));
    }

    #[test]
    fn test_render_more_indicator() {
        let mut t = table("wide", &[]);
        for i in 0..20 {
            t.columns.push(Column {
                name: format!("c{i}"),
                typ: "text".to_string(),
                nullable: true,
                default: None,
                auto_increment: false,
            });
        }
        let schema = Schema::new(vec![t]).unwrap();
        let canvas = CanvasState::from_layout(&LayoutEngine::default().layout(&schema));
        let svg = render(&schema, &canvas);

        assert!(svg.contains("+10 more"));
    }

    #[test]
    fn test_render_escapes_names() {
        let schema = Schema::new(vec![table("a<b>&\"c\"", &[])]).unwrap();
        let canvas = CanvasState::from_layout(&LayoutEngine::default().layout(&schema));
        let svg = render(&schema, &canvas);

        assert!(svg.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    }
}
