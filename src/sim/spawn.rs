//! Spawn schedule and particle generators
//!
//! The whole spawn timeline is one pre-built queue owned by the run: every
//! entry is a (delay, what) pair, drained as animation time passes. No
//! free-running timers, so cancelling the run cancels everything pending
//! with it, and the timeline itself never depends on the RNG.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::{ConfettiState, Particle, SHAPES, Shape};
use crate::render::palette;

/// Drops in the golden rain
const RAIN_DROPS: u32 = 60;
/// Delay between consecutive rain drops (ms)
const RAIN_SPACING_MS: f64 = 30.0;
/// Jets per side fountain
const FOUNTAIN_JETS: u32 = 25;
/// Delay between consecutive fountain jets (ms)
const FOUNTAIN_SPACING_MS: f64 = 40.0;

/// One scheduled spawn
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnEvent {
    /// Delay from animation start (ms)
    pub at_ms: f64,
    pub kind: SpawnKind,
}

/// What a schedule entry spawns when it fires
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnKind {
    /// Radial explosion around a point
    Burst {
        center: Vec2,
        count: u32,
        wave: u8,
        intensity: f32,
    },
    /// One golden drop falling in from above the viewport
    RainDrop,
    /// One jet out of a bottom-corner fountain; direction tilts it inward
    FountainJet { x: f32, direction: f32 },
}

/// The fixed spawn timeline for a viewport, earliest first
pub fn build_schedule(viewport: Vec2) -> Vec<SpawnEvent> {
    let center = Vec2::new(viewport.x * 0.5, viewport.y * 0.35);
    let mut schedule = Vec::with_capacity(117);

    let mut push_burst = |at_ms: f64, center: Vec2, count: u32, wave: u8, intensity: f32| {
        schedule.push(SpawnEvent {
            at_ms,
            kind: SpawnKind::Burst {
                center,
                count,
                wave,
                intensity,
            },
        });
    };

    // Main explosion, then cascading secondary bursts
    push_burst(0.0, center, 120, 0, 1.2);
    push_burst(80.0, viewport * Vec2::new(0.15, 0.25), 50, 1, 1.0);
    push_burst(120.0, viewport * Vec2::new(0.85, 0.25), 50, 1, 1.0);
    push_burst(180.0, viewport * Vec2::new(0.25, 0.12), 40, 2, 1.0);
    push_burst(220.0, viewport * Vec2::new(0.75, 0.12), 40, 2, 1.0);
    push_burst(280.0, center * Vec2::new(1.0, 0.6), 60, 2, 0.8);
    // Grand finale
    push_burst(1200.0, center, 80, 5, 1.5);

    // Golden rain starts once the first bursts have bloomed
    for i in 0..RAIN_DROPS {
        schedule.push(SpawnEvent {
            at_ms: 400.0 + i as f64 * RAIN_SPACING_MS,
            kind: SpawnKind::RainDrop,
        });
    }

    // Side fountains, left then right, tilting toward the middle
    for i in 0..FOUNTAIN_JETS {
        schedule.push(SpawnEvent {
            at_ms: 600.0 + i as f64 * FOUNTAIN_SPACING_MS,
            kind: SpawnKind::FountainJet {
                x: viewport.x * 0.1,
                direction: 1.0,
            },
        });
        schedule.push(SpawnEvent {
            at_ms: 700.0 + i as f64 * FOUNTAIN_SPACING_MS,
            kind: SpawnKind::FountainJet {
                x: viewport.x * 0.9,
                direction: -1.0,
            },
        });
    }

    schedule.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    schedule
}

/// Fire one spawn event into the run
pub(super) fn apply(state: &mut ConfettiState, kind: &SpawnKind) {
    match *kind {
        SpawnKind::Burst {
            center,
            count,
            wave,
            intensity,
        } => burst(state, center, count, wave, intensity),
        SpawnKind::RainDrop => rain_drop(state),
        SpawnKind::FountainJet { x, direction } => fountain_jet(state, x, direction),
    }
}

/// Radial burst: evenly spread launch angles with random jitter, kicked
/// upward so the cloud blooms before gravity wins
fn burst(state: &mut ConfettiState, center: Vec2, count: u32, wave: u8, intensity: f32) {
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32 + state.rng.random::<f32>() * 0.5;
        let speed = (state.rng.random::<f32>() * 20.0 + 15.0) * intensity;

        let particle = Particle {
            pos: center,
            vel: Vec2::new(
                angle.cos() * speed * (0.8 + state.rng.random::<f32>() * 0.4),
                angle.sin() * speed * (0.8 + state.rng.random::<f32>() * 0.4) - 10.0,
            ),
            color: palette::random_celebration(&mut state.rng),
            size: state.rng.random::<f32>() * 14.0 + 8.0,
            rotation: state.rng.random::<f32>() * 360.0,
            rotation_speed: (state.rng.random::<f32>() - 0.5) * 30.0,
            opacity: 1.0,
            shape: SHAPES[state.rng.random_range(0..SHAPES.len())],
            wave,
            shimmer: state.rng.random::<f32>() * TAU,
            shimmer_speed: state.rng.random::<f32>() * 0.3 + 0.1,
            trail: Vec::new(),
        };
        state.particles.push(particle);
    }
}

/// One golden drop: slow drift down from above the top edge
fn rain_drop(state: &mut ConfettiState) {
    let width = state.viewport.x;
    let particle = Particle {
        pos: Vec2::new(state.rng.random::<f32>() * width, -20.0),
        vel: Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 3.0,
            state.rng.random::<f32>() * 4.0 + 3.0,
        ),
        color: palette::random_gold(&mut state.rng),
        size: state.rng.random::<f32>() * 8.0 + 4.0,
        rotation: state.rng.random::<f32>() * 360.0,
        rotation_speed: (state.rng.random::<f32>() - 0.5) * 15.0,
        opacity: 1.0,
        // Rain is all trail shapes so the drops streak
        shape: if state.rng.random::<f32>() > 0.5 {
            Shape::Sparkle
        } else {
            Shape::Star
        },
        wave: 3,
        shimmer: state.rng.random::<f32>() * TAU,
        shimmer_speed: state.rng.random::<f32>() * 0.4 + 0.2,
        trail: Vec::new(),
    };
    state.particles.push(particle);
}

/// One fountain jet: launched up from the bottom edge, tilted inward
fn fountain_jet(state: &mut ConfettiState, x: f32, direction: f32) {
    let angle = -FRAC_PI_2 + (state.rng.random::<f32>() - 0.5) * 0.8;
    let speed = state.rng.random::<f32>() * 15.0 + 10.0;

    let particle = Particle {
        pos: Vec2::new(x, state.viewport.y),
        vel: Vec2::new(
            angle.cos() * speed * direction + (state.rng.random::<f32>() - 0.5) * 5.0,
            angle.sin() * speed - 5.0,
        ),
        color: palette::random_celebration(&mut state.rng),
        size: state.rng.random::<f32>() * 10.0 + 6.0,
        rotation: state.rng.random::<f32>() * 360.0,
        rotation_speed: (state.rng.random::<f32>() - 0.5) * 20.0,
        opacity: 1.0,
        shape: SHAPES[state.rng.random_range(0..SHAPES.len())],
        wave: 4,
        shimmer: state.rng.random::<f32>() * TAU,
        shimmer_speed: state.rng.random::<f32>() * 0.3 + 0.1,
        trail: Vec::new(),
    };
    state.particles.push(particle);
}
