//! Rendering for the confetti celebration
//!
//! The simulation never talks to a canvas directly. Every frame is drawn
//! through the `Surface` trait, so the browser canvas, the mesh tessellator
//! and test doubles all plug in the same way.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod mesh;
pub mod shapes;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use mesh::MeshSurface;
pub use shapes::draw_particle;
pub use vertex::{Vertex, palette};

use glam::Vec2;

use crate::sim::ConfettiState;

/// A 2D drawing target the size of the viewport
///
/// Colors are straight rgba in 0..=1. Polylines use round caps where the
/// backend supports them.
pub trait Surface {
    /// Wipe the previous frame
    fn clear(&mut self);
    /// Fill a closed polygon given its outline in draw order
    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
    /// Stroke an open polyline of the given width
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]);
}

/// Clear and redraw every particle that is still visible
pub fn draw_frame(state: &ConfettiState, surface: &mut dyn Surface) {
    surface.clear();
    for particle in state.live_particles() {
        draw_particle(surface, particle);
    }
}
