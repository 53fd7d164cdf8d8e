//! Vertex type and confetti palette

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Confetti colors
///
/// Particles store a palette index instead of a color so the two backends
/// can emit whatever representation they need (rgba floats for meshes, CSS
/// strings for canvas).
pub mod palette {
    use rand::Rng;

    /// Rich gold and celebration colors, as sRGB bytes
    pub const CELEBRATION: [[u8; 3]; 30] = [
        // Golds
        [0xFF, 0xD7, 0x00],
        [0xFF, 0xC1, 0x07],
        [0xFF, 0xEB, 0x3B],
        [0xFF, 0xE0, 0x82],
        // Pinks/Reds
        [0xFF, 0x6B, 0x6B],
        [0xFF, 0x47, 0x57],
        [0xFF, 0x69, 0xB4],
        [0xE9, 0x1E, 0x63],
        // Teals
        [0x4E, 0xCD, 0xC4],
        [0x00, 0xCE, 0xD1],
        [0x00, 0xBC, 0xD4],
        [0x26, 0xC6, 0xDA],
        // Greens
        [0x2E, 0xD5, 0x73],
        [0x1E, 0x8E, 0x3E],
        [0x4C, 0xAF, 0x50],
        [0x8B, 0xC3, 0x4A],
        // Blues
        [0x1E, 0x90, 0xFF],
        [0x21, 0x96, 0xF3],
        [0x64, 0xB5, 0xF6],
        [0x42, 0xA5, 0xF5],
        // Oranges
        [0xFF, 0xA5, 0x02],
        [0xFF, 0x98, 0x00],
        [0xFF, 0xB7, 0x4D],
        [0xFF, 0xCC, 0x80],
        // Purples
        [0xE0, 0x40, 0xFB],
        [0x9C, 0x27, 0xB0],
        [0xBA, 0x68, 0xC8],
        [0xCE, 0x93, 0xD8],
        // Whites for sparkle
        [0xFF, 0xFF, 0xFF],
        [0xF5, 0xF5, 0xF5],
    ];

    /// Palette indices the golden rain draws from (golds plus white)
    pub const GOLDEN_RAIN: [u8; 5] = [0, 1, 2, 3, 28];

    /// Uniform random pick from the whole palette
    pub fn random_celebration<R: Rng>(rng: &mut R) -> u8 {
        rng.random_range(0..CELEBRATION.len()) as u8
    }

    /// Uniform random pick from the golden-rain colors
    pub fn random_gold<R: Rng>(rng: &mut R) -> u8 {
        GOLDEN_RAIN[rng.random_range(0..GOLDEN_RAIN.len())]
    }

    /// Palette color as straight rgba in 0..=1 with the given alpha
    pub fn with_alpha(index: u8, alpha: f32) -> [f32; 4] {
        let [r, g, b] = CELEBRATION[index as usize % CELEBRATION.len()];
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            alpha,
        ]
    }
}
