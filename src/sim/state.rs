//! Confetti state and core simulation types
//!
//! Everything that makes a run reproducible lives here: the seed, the spawn
//! queue, and the particle set. Nothing in this module touches a clock or a
//! canvas.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::{SpawnEvent, build_schedule};
use crate::consts::*;

/// Closed set of confetti shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Circle,
    Star,
    Heart,
    Diamond,
    Sparkle,
}

/// All shapes, for uniform random picks
pub const SHAPES: [Shape; 6] = [
    Shape::Rect,
    Shape::Circle,
    Shape::Star,
    Shape::Heart,
    Shape::Diamond,
    Shape::Sparkle,
];

impl Shape {
    /// Shapes that also draw a motion trail
    pub fn has_trail(self) -> bool {
        matches!(self, Shape::Star | Shape::Sparkle)
    }
}

/// Phase of the celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted, nothing spawned yet
    Idle,
    /// Spawn events still pending in the queue
    Bursting,
    /// Everything spawned; particles falling and fading
    Settling,
    /// Duration elapsed; the loop must stop
    Done,
}

/// One piece of confetti
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Index into `render::palette::CELEBRATION`
    pub color: u8,
    /// Bounding extent in px; shapes carve their proportions from it
    pub size: f32,
    /// Degrees, clockwise in y-down space
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    /// 1 at spawn, stepped down to 0 after the fade delay
    pub opacity: f32,
    pub shape: Shape,
    /// Spawn group; later waves start fading later
    pub wave: u8,
    /// Shimmer phase (radians)
    pub shimmer: f32,
    /// Shimmer phase advance per frame
    pub shimmer_speed: f32,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Particle {
    /// Record current position to the trail (call each frame, before moving)
    pub fn record_trail(&mut self) {
        if self.trail.len() == TRAIL_CAPACITY {
            self.trail.remove(0);
        }
        self.trail.push(self.pos);
    }

    /// Whether the particle still draws
    pub fn is_live(&self) -> bool {
        self.opacity > 0.0
    }

    /// Alpha actually drawn this frame, shimmer-modulated
    pub fn draw_alpha(&self) -> f32 {
        self.opacity * (0.85 + self.shimmer.sin() * 0.15)
    }

    /// Animation time after which this particle starts fading (ms)
    pub fn fade_start_ms(&self) -> f64 {
        FADE_BASE_MS + self.wave as f64 * FADE_WAVE_MS
    }
}

/// Complete celebration state (deterministic for a given seed and viewport)
#[derive(Debug, Clone)]
pub struct ConfettiState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Viewport size in px (canvas backing size)
    pub viewport: Vec2,
    /// Frames advanced since start
    pub frame: u64,
    /// Current phase
    pub phase: Phase,
    /// All scheduled spawns, earliest first
    pub(super) schedule: Vec<SpawnEvent>,
    /// Index of the next unfired schedule entry
    pub(super) next_event: usize,
    /// Every particle spawned so far; faded ones stay until the run ends
    pub particles: Vec<Particle>,
    /// Deterministic RNG; all randomness flows through here
    pub(super) rng: Pcg32,
}

impl ConfettiState {
    /// Create a run for the given viewport; nothing spawns until it starts
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            seed,
            viewport,
            frame: 0,
            phase: Phase::Idle,
            schedule: build_schedule(viewport),
            next_event: 0,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Animation time elapsed (ms)
    pub fn elapsed_ms(&self) -> f64 {
        self.frame as f64 * FRAME_MS
    }

    /// Spawn events not yet fired
    pub fn pending_spawns(&self) -> usize {
        self.schedule.len() - self.next_event
    }

    /// Particles that still draw this frame
    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.live_particles().count()
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}
