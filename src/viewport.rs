//! Pan/zoom state and the screen <-> world coordinate mapping.

use crate::config::ViewportConfig;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which point stays fixed on screen while zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAnchor {
    /// Scale about the world origin. Content away from the origin drifts
    /// relative to the cursor.
    #[default]
    Origin,
    /// Keep the world point under the cursor in place.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Negative (or zero) wheel delta zooms in, positive zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.pan_x) / self.scale, (p.y - self.pan_y) / self.scale)
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.pan_x, p.y * self.scale + self.pan_y)
    }

    pub fn rect_to_screen(&self, r: Rect) -> Rect {
        let origin = self.world_to_screen(Point::new(r.x, r.y));
        Rect {
            x: origin.x,
            y: origin.y,
            width: r.width * self.scale,
            height: r.height * self.scale,
        }
    }

    /// Shift the pan offset by a raw screen-space delta.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the scale by the configured step and clamp it. `anchor` is
    /// only honoured when the config asks for pointer-anchored zoom.
    pub fn apply_zoom(
        &mut self,
        direction: ZoomDirection,
        anchor: Option<Point>,
        config: &ViewportConfig,
    ) {
        let factor = match direction {
            ZoomDirection::In => config.zoom_in_factor,
            ZoomDirection::Out => config.zoom_out_factor,
        };
        let new_scale = (self.scale * factor).clamp(config.min_scale, config.max_scale);

        match (config.zoom_anchor, anchor) {
            (ZoomAnchor::Pointer, Some(screen)) => {
                let world = self.screen_to_world(screen);
                self.scale = new_scale;
                self.pan_x = screen.x - world.x * new_scale;
                self.pan_y = screen.y - world.y * new_scale;
            }
            _ => self.scale = new_scale,
        }
    }

    pub fn reset(&mut self) {
        *self = Viewport::default();
    }

    /// SVG/CSS transform placing world content on screen.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.pan_x, self.pan_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_to_world() {
        let v = Viewport {
            pan_x: 100.0,
            pan_y: 50.0,
            scale: 2.0,
        };
        assert_eq!(v.screen_to_world(Point::new(300.0, 250.0)), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_round_trip() {
        let v = Viewport {
            pan_x: -37.5,
            pan_y: 812.25,
            scale: 0.7,
        };
        for p in [
            Point::new(0.0, 0.0),
            Point::new(1500.0, -1200.0),
            Point::new(-3.3, 77.7),
        ] {
            let back = v.screen_to_world(v.world_to_screen(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pan_is_not_rescaled() {
        let mut v = Viewport {
            scale: 2.5,
            ..Viewport::default()
        };
        v.apply_pan(10.0, -4.0);
        v.apply_pan(5.0, 1.0);
        assert_eq!((v.pan_x, v.pan_y), (15.0, -3.0));
    }

    #[test]
    fn test_zoom_steps() {
        let config = ViewportConfig::default();
        let mut v = Viewport::default();
        v.apply_zoom(ZoomDirection::In, None, &config);
        assert_relative_eq!(v.scale, 1.1, epsilon = 1e-12);
        v.apply_zoom(ZoomDirection::Out, None, &config);
        assert_relative_eq!(v.scale, 0.99, epsilon = 1e-12);
    }

    #[test]
    fn test_zoom_clamped() {
        let config = ViewportConfig::default();
        let mut v = Viewport::default();

        for _ in 0..100 {
            v.apply_zoom(ZoomDirection::In, None, &config);
            assert!(v.scale <= 3.0);
        }
        assert_eq!(v.scale, 3.0);

        for _ in 0..100 {
            v.apply_zoom(ZoomDirection::Out, None, &config);
            assert!(v.scale >= 0.3);
        }
        assert_eq!(v.scale, 0.3);
    }

    #[test]
    fn test_origin_anchor_ignores_pointer() {
        let config = ViewportConfig::default();
        let mut v = Viewport {
            pan_x: 40.0,
            pan_y: 20.0,
            scale: 1.0,
        };
        v.apply_zoom(ZoomDirection::In, Some(Point::new(500.0, 500.0)), &config);
        assert_eq!((v.pan_x, v.pan_y), (40.0, 20.0));
    }

    #[test]
    fn test_pointer_anchor_keeps_world_point() {
        let config = ViewportConfig {
            zoom_anchor: ZoomAnchor::Pointer,
            ..ViewportConfig::default()
        };
        let mut v = Viewport {
            pan_x: 40.0,
            pan_y: 20.0,
            scale: 1.0,
        };
        let cursor = Point::new(500.0, 300.0);
        let before = v.screen_to_world(cursor);

        v.apply_zoom(ZoomDirection::In, Some(cursor), &config);
        v.apply_zoom(ZoomDirection::In, Some(cursor), &config);

        let after = v.screen_to_world(cursor);
        assert_relative_eq!(after.x, before.x, epsilon = 1e-9);
        assert_relative_eq!(after.y, before.y, epsilon = 1e-9);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(ZoomDirection::from_wheel_delta(120.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_wheel_delta(-120.0), ZoomDirection::In);
    }

    #[test]
    fn test_transform() {
        let v = Viewport {
            pan_x: 10.0,
            pan_y: -5.5,
            scale: 1.5,
        };
        assert_eq!(v.transform(), "translate(10, -5.5) scale(1.5)");
        assert_eq!(
            v.rect_to_screen(Rect::from_origin(Point::new(2.0, 2.0), Size::new(4.0, 8.0))),
            Rect {
                x: 13.0,
                y: -2.5,
                width: 6.0,
                height: 12.0
            }
        );
    }
}
