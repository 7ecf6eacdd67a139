//! Node placement for the innermost row and the outer rings.

use crate::config::LayoutConfig;
use crate::geometry::{Point, Size};
use std::f64::consts::{PI, TAU};

fn table_size(config: &LayoutConfig) -> Size {
    Size::new(config.table_width, config.table_height)
}

/// Centre-to-centre spacing needed between two neighbouring tables.
fn slot_width(config: &LayoutConfig) -> f64 {
    config.table_width + config.min_gap
}

/// Top-left positions for a single row centred on the layout origin.
pub fn place_row(count: usize, config: &LayoutConfig) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }

    let step = slot_width(config);
    let row_width = count as f64 * config.table_width + (count - 1) as f64 * config.min_gap;
    let start_x = config.center_x - row_width / 2.0;
    let y = config.center_y - config.table_height / 2.0;

    (0..count)
        .map(|i| Point::new(start_x + i as f64 * step, y))
        .collect()
}

/// Radius of ring `tier` holding `count` tables.
///
/// Takes the largest of: the arc length needed for `count` slots, the chord
/// length needed between neighbours, and a floor that clears the origin
/// row plus `tier * tier_spacing`.
pub fn ring_radius(tier: usize, count: usize, config: &LayoutConfig) -> f64 {
    let slot = slot_width(config);
    let arc = count as f64 * slot / TAU;
    let chord = if count >= 2 {
        slot / (2.0 * (PI / count as f64).sin())
    } else {
        0.0
    };
    let floor = table_size(config).diagonal() / 2.0
        + config.min_gap
        + tier as f64 * config.tier_spacing;

    arc.max(chord).max(floor)
}

/// Odd tiers are rotated by half a slot so nodes do not line up radially
/// with the tier inside them.
pub fn angle_offset(tier: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (tier % 2) as f64 * (PI / count as f64)
}

/// Centres of `count` tables evenly spaced on ring `tier`.
pub fn ring_centers(tier: usize, count: usize, config: &LayoutConfig) -> Vec<Point> {
    let radius = ring_radius(tier, count, config);
    let offset = angle_offset(tier, count);

    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * TAU + offset;
            Point::new(
                config.center_x + radius * angle.cos(),
                config.center_y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Top-left positions for ring `tier`.
pub fn place_ring(tier: usize, count: usize, config: &LayoutConfig) -> Vec<Point> {
    let half = Point::new(config.table_width / 2.0, config.table_height / 2.0);
    ring_centers(tier, count, config)
        .into_iter()
        .map(|c| c - half)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_is_centered() {
        let config = LayoutConfig::default();
        let row = place_row(2, &config);

        assert_eq!(row[1].x - row[0].x, 380.0);
        let left_center = row[0].x + 140.0;
        let right_center = row[1].x + 140.0;
        assert_relative_eq!((left_center + right_center) / 2.0, config.center_x);
        assert_eq!(row[0].y + 200.0, config.center_y);
    }

    #[test]
    fn test_single_row_node_sits_on_center() {
        let config = LayoutConfig::default();
        let row = place_row(1, &config);
        assert_eq!(row, vec![Point::new(1360.0, 1000.0)]);
    }

    #[test]
    fn test_ring_radius_floor() {
        let config = LayoutConfig::default();
        let floor = Size::new(280.0, 400.0).diagonal() / 2.0 + 100.0;

        assert_relative_eq!(ring_radius(1, 4, &config), floor + 600.0);
        assert_relative_eq!(ring_radius(2, 6, &config), floor + 1200.0);
    }

    #[test]
    fn test_ring_radius_grows_with_count() {
        let config = LayoutConfig::default();
        let r = ring_radius(3, 200, &config);
        assert!(r >= 200.0 * 380.0 / TAU);
    }

    #[test]
    fn test_angle_offset_alternates() {
        assert_eq!(angle_offset(1, 4), PI / 4.0);
        assert_eq!(angle_offset(2, 6), 0.0);
        assert_eq!(angle_offset(3, 3), PI / 3.0);
    }

    #[test]
    fn test_ring_centers_on_circle() {
        let config = LayoutConfig::default();
        let origin = Point::new(config.center_x, config.center_y);
        let radius = ring_radius(2, 6, &config);

        for c in ring_centers(2, 6, &config) {
            assert_relative_eq!(c.distance(origin), radius, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_ring_neighbours_do_not_overlap() {
        let config = LayoutConfig::default();
        for count in [2, 3, 4, 6, 20, 36, 68, 150] {
            let centers = ring_centers(3, count, &config);
            for i in 0..count {
                for j in (i + 1)..count {
                    assert!(
                        centers[i].distance(centers[j]) >= 380.0 - 1e-6,
                        "count={count} i={i} j={j}"
                    );
                }
            }
        }
    }
}
