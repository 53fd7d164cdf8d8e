//! Donation economy configuration
//!
//! Mirrors the bot's campaign settings so goal math shown in the Mini App
//! matches what the bot announces in chat.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DONATION_GOAL_STARS, DONATION_MILESTONES, LEADERBOARD_LIMIT, STARS_PER_DOLLAR,
};

/// Environment variable overriding the bot data directory
pub const DATA_DIR_ENV: &str = "RELAY_DATA_DIR";
/// Snapshot file the bot writes inside the data directory
const DONATIONS_FILE: &str = "donations.json";

/// Campaign settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationConfig {
    /// Campaign goal in Stars
    pub goal_stars: u64,
    /// Stars per display dollar
    pub stars_per_dollar: u64,
    /// Announcement thresholds in Stars, ascending
    pub milestones: Vec<u64>,
    /// Leaderboard page size
    pub leaderboard_limit: usize,
    /// Bot data directory holding the donations snapshot
    pub data_dir: PathBuf,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            goal_stars: DONATION_GOAL_STARS,
            stars_per_dollar: STARS_PER_DOLLAR,
            milestones: DONATION_MILESTONES.to_vec(),
            leaderboard_limit: LEADERBOARD_LIMIT,
            data_dir: PathBuf::from("telegram-bot/data"),
        }
    }
}

impl DonationConfig {
    /// Defaults, with the data directory taken from `RELAY_DATA_DIR` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            log::info!("Using data directory from {DATA_DIR_ENV}: {dir}");
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Path to the donations snapshot file
    pub fn donations_path(&self) -> PathBuf {
        self.data_dir.join(DONATIONS_FILE)
    }

    /// Campaign goal in display dollars
    pub fn goal_usd(&self) -> f64 {
        self.goal_stars as f64 / self.stars_per_dollar as f64
    }

    /// Display-dollar transform; ranking never uses this
    pub fn stars_to_usd(&self, stars: u64) -> f64 {
        stars as f64 / self.stars_per_dollar as f64
    }

    /// Percent of the goal raised, clamped to 100 for the progress bar
    pub fn progress_percent(&self, total_usd: f64) -> f64 {
        ((total_usd / self.goal_usd()) * 100.0).min(100.0)
    }

    /// Highest milestone already reached, if any
    pub fn milestone_reached(&self, total_stars: u64) -> Option<u64> {
        self.milestones
            .iter()
            .copied()
            .filter(|&m| m <= total_stars)
            .max()
    }

    /// Next milestone still ahead, if any
    pub fn next_milestone(&self, total_stars: u64) -> Option<u64> {
        self.milestones
            .iter()
            .copied()
            .filter(|&m| m > total_stars)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_economy() {
        let config = DonationConfig::default();
        assert_eq!(config.goal_stars, 50_000);
        assert_eq!(config.stars_per_dollar, 50);
        assert_eq!(config.goal_usd(), 1000.0);
        assert_eq!(config.stars_to_usd(250), 5.0);
        assert_eq!(config.leaderboard_limit, 100);
        assert!(config.donations_path().ends_with("donations.json"));
    }

    #[test]
    fn test_progress_clamps_at_full() {
        let config = DonationConfig::default();
        assert_eq!(config.progress_percent(0.0), 0.0);
        assert_eq!(config.progress_percent(500.0), 50.0);
        assert_eq!(config.progress_percent(1000.0), 100.0);
        // Overfunded campaigns still show a full bar
        assert_eq!(config.progress_percent(1500.0), 100.0);
    }

    #[test]
    fn test_milestone_lookup() {
        let config = DonationConfig::default();
        assert_eq!(config.milestone_reached(4_999), None);
        assert_eq!(config.milestone_reached(5_000), Some(5_000));
        assert_eq!(config.milestone_reached(26_000), Some(25_000));
        assert_eq!(config.milestone_reached(90_000), Some(50_000));

        assert_eq!(config.next_milestone(0), Some(5_000));
        assert_eq!(config.next_milestone(25_000), Some(50_000));
        assert_eq!(config.next_milestone(50_000), None);
    }
}
