//! Relay Stars - donation leaderboard and celebration core
//!
//! Core modules:
//! - `leaderboard`: Donor snapshot model and rank computation
//! - `store`: Read-only access to the bot's donations file
//! - `config`: Donation economy constants and overrides
//! - `sim`: Deterministic confetti simulation (spawns, physics, phases)
//! - `render`: Drawing-surface abstraction with canvas and mesh backends

pub mod config;
pub mod leaderboard;
pub mod render;
pub mod sim;
pub mod store;

pub use config::DonationConfig;
pub use leaderboard::{LeaderboardEntry, LeaderboardResponse, Stats};
pub use sim::{ConfettiDriver, ConfettiState};
pub use store::{FileStore, SnapshotSource};

/// Shared tuning constants
pub mod consts {
    /// Donation campaign goal in Telegram Stars (~$1000)
    pub const DONATION_GOAL_STARS: u64 = 50_000;
    /// Stars-to-USD conversion rate (50 Stars ~ $1)
    pub const STARS_PER_DOLLAR: u64 = 50;
    /// Milestone thresholds announced by the bot, in Stars
    pub const DONATION_MILESTONES: [u64; 4] = [5_000, 10_000, 25_000, 50_000];
    /// Leaderboard page size
    pub const LEADERBOARD_LIMIT: usize = 100;

    /// Frame rate the confetti physics constants are tuned for
    pub const FRAMES_PER_SECOND: f64 = 60.0;
    /// Milliseconds of animation time per simulation frame
    pub const FRAME_MS: f64 = 1000.0 / FRAMES_PER_SECOND;
    /// Celebration length before the loop stops (ms)
    pub const CELEBRATION_MS: f64 = 5500.0;
    /// Maximum frames advanced per driver call to prevent spiral of death
    pub const MAX_FRAME_CATCHUP: u32 = 8;

    /// Downward acceleration per frame, canvas px (y grows down)
    pub const GRAVITY: f32 = 0.35;
    /// Horizontal drag multiplier per frame
    pub const DRAG: f32 = 0.985;
    /// Opacity lost per frame once a particle starts fading
    pub const FADE_STEP: f32 = 0.018;
    /// Base delay before any particle fades (ms)
    pub const FADE_BASE_MS: f64 = 1500.0;
    /// Extra fade delay per spawn wave (ms)
    pub const FADE_WAVE_MS: f64 = 250.0;
    /// Trail positions kept per particle
    pub const TRAIL_CAPACITY: usize = 5;
}
