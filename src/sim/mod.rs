//! Deterministic confetti simulation
//!
//! The success-screen celebration as pure state plus frame steps. This
//! module must stay deterministic:
//! - Fixed 60 Hz frames only
//! - Seeded RNG only
//! - All spawns flow through one scheduled queue, never free-running timers
//! - No rendering or platform dependencies (drawing goes through `render::Surface`)

pub mod driver;
pub mod spawn;
pub mod state;
pub mod tick;

pub use driver::{CancelHandle, ConfettiDriver};
pub use spawn::{SpawnEvent, SpawnKind, build_schedule};
pub use state::{ConfettiState, Particle, Phase, SHAPES, Shape};
pub use tick::{start, step};
