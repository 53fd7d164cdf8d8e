//! Triangle-mesh surface
//!
//! Tessellates every fill into a flat triangle list each frame, ready to
//! upload as a vertex buffer or to inspect from tests. This is the backend
//! headless runs draw to.

use glam::Vec2;

use super::Surface;
use super::vertex::Vertex;

/// Segments per circle fan
const CIRCLE_SEGMENTS: u32 = 24;

/// Collects one frame of triangles
#[derive(Debug, Default)]
pub struct MeshSurface {
    pub vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triangles currently buffered
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Surface for MeshSurface {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }

        // Fan out from the centroid; all confetti outlines are star-shaped
        // around it, so the fan covers them exactly
        let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            self.vertices.push(Vertex::new(centroid.x, centroid.y, color));
            self.vertices.push(Vertex::new(a.x, a.y, color));
            self.vertices.push(Vertex::new(b.x, b.y, color));
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        for i in 0..CIRCLE_SEGMENTS {
            let theta1 = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            let theta2 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;

            self.vertices.push(Vertex::new(center.x, center.y, color));
            self.vertices.push(Vertex::new(
                center.x + radius * theta1.cos(),
                center.y + radius * theta1.sin(),
                color,
            ));
            self.vertices.push(Vertex::new(
                center.x + radius * theta2.cos(),
                center.y + radius * theta2.sin(),
                color,
            ));
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        if points.len() < 2 {
            return;
        }

        let half = width / 2.0;
        for pair in points.windows(2) {
            let dir = (pair[1] - pair[0]).normalize_or_zero();
            if dir == Vec2::ZERO {
                continue;
            }
            let perp = Vec2::new(-dir.y, dir.x) * half;

            let a1 = pair[0] + perp;
            let b1 = pair[0] - perp;
            let a2 = pair[1] + perp;
            let b2 = pair[1] - perp;

            // Two triangles per segment
            self.vertices.push(Vertex::new(a1.x, a1.y, color));
            self.vertices.push(Vertex::new(b1.x, b1.y, color));
            self.vertices.push(Vertex::new(a2.x, a2.y, color));

            self.vertices.push(Vertex::new(a2.x, a2.y, color));
            self.vertices.push(Vertex::new(b1.x, b1.y, color));
            self.vertices.push(Vertex::new(b2.x, b2.y, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shapes;

    #[test]
    fn test_polygon_fan_counts() {
        let mut mesh = MeshSurface::new();
        mesh.fill_polygon(&shapes::rect_points(10.0), [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 4);

        mesh.clear();
        mesh.fill_polygon(&shapes::star_points(10.0), [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 10);
    }

    #[test]
    fn test_degenerate_inputs_emit_nothing() {
        let mut mesh = MeshSurface::new();
        mesh.fill_polygon(&[Vec2::ZERO, Vec2::ONE], [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 0);

        mesh.stroke_polyline(&[Vec2::ZERO], 2.0, [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 0);

        // Repeated point has no direction; the segment is dropped
        mesh.stroke_polyline(&[Vec2::ONE, Vec2::ONE], 2.0, [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_circle_fan_stays_on_radius() {
        let mut mesh = MeshSurface::new();
        let center = Vec2::new(50.0, 60.0);
        mesh.fill_circle(center, 5.0, [1.0; 4]);
        assert_eq!(mesh.triangle_count(), CIRCLE_SEGMENTS as usize);

        for (i, v) in mesh.vertices.iter().enumerate() {
            let p = Vec2::new(v.position[0], v.position[1]);
            let r = (p - center).length();
            if i % 3 == 0 {
                assert!(r < 1e-4); // fan center
            } else {
                assert!((r - 5.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_stroke_quad_width() {
        let mut mesh = MeshSurface::new();
        // Horizontal segment of width 4: all corners sit 2 px off the axis
        mesh.stroke_polyline(
            &[Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0)],
            4.0,
            [1.0; 4],
        );
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert!((v.position[1] - 8.0).abs() < 1e-4 || (v.position[1] - 12.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut mesh = MeshSurface::new();
        mesh.fill_circle(Vec2::ZERO, 1.0, [1.0; 4]);
        assert!(mesh.triangle_count() > 0);
        mesh.clear();
        assert_eq!(mesh.triangle_count(), 0);
    }
}
