//! Confetti shape geometry
//!
//! Shapes are produced as outlines in local space around the particle
//! center, then rotated and translated on the CPU before hitting the
//! surface. A particle's "size" is roughly its bounding extent; each shape
//! carves its own proportions out of it.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::Surface;
use super::vertex::palette;
use crate::sim::{Particle, Shape};

/// Line segments used to flatten each heart bezier
const HEART_SEGMENTS: usize = 16;

/// Rectangle outline, size wide and size/2 tall
pub fn rect_points(size: f32) -> [Vec2; 4] {
    let hw = size / 2.0;
    let hh = size / 4.0;
    [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
}

/// Five-spike star outline (10 vertices, alternating radius)
pub fn star_points(size: f32) -> [Vec2; 10] {
    let outer = size / 2.0;
    let inner = size / 4.0;
    let mut points = [Vec2::ZERO; 10];
    for (i, point) in points.iter_mut().enumerate() {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = PI * i as f32 / 5.0 - FRAC_PI_2;
        *point = Vec2::new(angle.cos() * radius, angle.sin() * radius);
    }
    points
}

/// Diamond outline, taller than wide
pub fn diamond_points(size: f32) -> [Vec2; 4] {
    let s = size / 2.0;
    [
        Vec2::new(0.0, -s),
        Vec2::new(s * 0.6, 0.0),
        Vec2::new(0.0, s),
        Vec2::new(-s * 0.6, 0.0),
    ]
}

/// Four-pointed sparkle outline; the points breathe with the shimmer phase
pub fn sparkle_points(size: f32, shimmer: f32) -> [Vec2; 8] {
    let s = size / 2.0;
    let pulse = 0.7 + shimmer.sin() * 0.3;
    [
        Vec2::new(0.0, -s * pulse),
        Vec2::new(s * 0.15, -s * 0.15),
        Vec2::new(s * pulse, 0.0),
        Vec2::new(s * 0.15, s * 0.15),
        Vec2::new(0.0, s * pulse),
        Vec2::new(-s * 0.15, s * 0.15),
        Vec2::new(-s * pulse, 0.0),
        Vec2::new(-s * 0.15, -s * 0.15),
    ]
}

/// Point on a cubic bezier at parameter t
fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Heart outline, two cubic beziers flattened to a polygon
pub fn heart_points(size: f32) -> Vec<Vec2> {
    let s = size / 2.0;
    let top = Vec2::new(0.0, s * 0.3);
    let bottom = Vec2::new(0.0, s);

    let mut points = Vec::with_capacity(2 * HEART_SEGMENTS + 1);
    points.push(top);
    // Left lobe: top dip down to the bottom tip
    for i in 1..=HEART_SEGMENTS {
        let t = i as f32 / HEART_SEGMENTS as f32;
        points.push(cubic_point(
            top,
            Vec2::new(-s, -s * 0.3),
            Vec2::new(-s, s * 0.6),
            bottom,
            t,
        ));
    }
    // Right lobe: bottom tip back up to the dip (stop one short of the
    // start point so the outline has no duplicate vertex)
    for i in 1..HEART_SEGMENTS {
        let t = i as f32 / HEART_SEGMENTS as f32;
        points.push(cubic_point(
            bottom,
            Vec2::new(s, s * 0.6),
            Vec2::new(s, -s * 0.3),
            top,
            t,
        ));
    }
    points
}

/// Rotate an outline (degrees, clockwise in y-down space) and move it into place
pub fn place(points: &mut [Vec2], center: Vec2, rotation_deg: f32) {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    for point in points.iter_mut() {
        *point = Vec2::new(
            point.x * cos - point.y * sin,
            point.x * sin + point.y * cos,
        ) + center;
    }
}

/// Draw one particle: trail first (stars and sparkles only), then the body
pub fn draw_particle(surface: &mut dyn Surface, p: &Particle) {
    if !p.is_live() {
        return;
    }

    if p.shape.has_trail() && p.trail.len() > 1 {
        let color = palette::with_alpha(p.color, p.opacity * 0.3);
        surface.stroke_polyline(&p.trail, p.size * 0.2, color);
    }

    let color = palette::with_alpha(p.color, p.draw_alpha());
    match p.shape {
        Shape::Rect => {
            let mut points = rect_points(p.size);
            place(&mut points, p.pos, p.rotation);
            surface.fill_polygon(&points, color);
        }
        // Rotation is invisible on a disc, so circles skip the transform
        Shape::Circle => surface.fill_circle(p.pos, p.size / 3.0, color),
        Shape::Star => {
            let mut points = star_points(p.size);
            place(&mut points, p.pos, p.rotation);
            surface.fill_polygon(&points, color);
        }
        Shape::Heart => {
            let mut points = heart_points(p.size);
            place(&mut points, p.pos, p.rotation);
            surface.fill_polygon(&points, color);
        }
        Shape::Diamond => {
            let mut points = diamond_points(p.size);
            place(&mut points, p.pos, p.rotation);
            surface.fill_polygon(&points, color);
        }
        Shape::Sparkle => {
            let mut points = sparkle_points(p.size, p.shimmer);
            place(&mut points, p.pos, p.rotation);
            surface.fill_polygon(&points, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_alternates_radii() {
        let points = star_points(20.0);
        for (i, p) in points.iter().enumerate() {
            let r = p.length();
            let expected = if i % 2 == 0 { 10.0 } else { 5.0 };
            assert!((r - expected).abs() < 1e-4, "vertex {i}: {r}");
        }
        // First spike points straight up (y-down space)
        assert!((points[0] - Vec2::new(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_heart_outline_is_closed_and_symmetric() {
        let points = heart_points(16.0);
        assert_eq!(points.len(), 2 * HEART_SEGMENTS);

        // Starts at the top dip, passes through the bottom tip
        assert!((points[0] - Vec2::new(0.0, 2.4)).length() < 1e-4);
        assert!((points[HEART_SEGMENTS] - Vec2::new(0.0, 8.0)).length() < 1e-4);

        // Mirror symmetry across x=0: lobe point i matches its twin
        for i in 1..HEART_SEGMENTS {
            let left = points[i];
            let right = points[2 * HEART_SEGMENTS - i];
            assert!((left.x + right.x).abs() < 1e-3);
            assert!((left.y - right.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_sparkle_pulse_range() {
        // sin(shimmer)=1 gives the longest points, -1 the shortest
        let wide = sparkle_points(10.0, FRAC_PI_2);
        assert!((wide[0].y + 5.0).abs() < 1e-4);
        let narrow = sparkle_points(10.0, -FRAC_PI_2);
        assert!((narrow[0].y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_place_rotates_then_translates() {
        let mut points = [Vec2::new(0.0, -10.0)];
        // 90 degrees clockwise in y-down space takes "up" to "right"
        place(&mut points, Vec2::new(100.0, 200.0), 90.0);
        assert!((points[0] - Vec2::new(110.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn test_rect_proportions() {
        let points = rect_points(12.0);
        assert_eq!(points[0], Vec2::new(-6.0, -3.0));
        assert_eq!(points[2], Vec2::new(6.0, 3.0));
    }
}
