//! Donation leaderboard
//!
//! The Telegram bot aggregates payments into a donations snapshot; this
//! module derives the ranked board the Mini App renders from it. Ranking is
//! pure: same snapshot in, same board out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DonationConfig;

/// A single contributor with cumulative totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    /// Telegram user id
    pub id: i64,
    /// Display name at time of last donation
    pub name: String,
    /// Telegram @username, if the user has one
    #[serde(default)]
    pub username: Option<String>,
    /// Lifetime Stars donated
    pub total_stars: u64,
    /// Lifetime USD equivalent (display only)
    pub total_usd: f64,
    /// Number of separate donations
    pub donation_count: u32,
    /// ISO-8601 timestamp of the first donation
    pub first_donation: String,
    /// ISO-8601 timestamp of the most recent donation
    pub last_donation: String,
    /// Telegram profile photo URL, if fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// One recorded payment (the bot keeps a bounded history)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: i64,
    pub stars: u64,
    pub usd: f64,
    /// Telegram payment charge id, needed for refunds
    pub charge_id: String,
    pub timestamp: String,
}

/// On-disk shape of the bot's donations snapshot
///
/// Donors are keyed by stringified user id. `BTreeMap` keeps iteration
/// order stable so equal star totals always rank in the same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationLog {
    #[serde(default)]
    pub donors: BTreeMap<String, Donor>,
    #[serde(default)]
    pub total_stars: u64,
    #[serde(default)]
    pub total_usd: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Highest milestone already announced by the bot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_milestone: Option<u64>,
}

/// One row of the rendered leaderboard (camelCase on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    /// Empty string when the donor has no @username
    pub username: String,
    /// Display amount in USD
    pub amount: f64,
    /// Dense 1-based rank in the full ordering
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Aggregate campaign totals (snake_case on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_stars: u64,
    pub total_usd: f64,
    pub total_donors: usize,
    pub goal_stars: u64,
    pub goal_usd: f64,
}

/// Everything the leaderboard screen needs in one payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub stats: Stats,
    /// The viewer's own row, ranked against the full board (not just the
    /// visible page); `null` when the viewer has not donated
    pub current_user: Option<LeaderboardEntry>,
}

/// Donors ordered by lifetime Stars, highest first
///
/// The sort is stable, so donors with equal totals keep their snapshot
/// (user-id) order and reranking is deterministic.
fn sorted_donors(log: &DonationLog) -> Vec<&Donor> {
    let mut donors: Vec<&Donor> = log.donors.values().collect();
    donors.sort_by(|a, b| b.total_stars.cmp(&a.total_stars));
    donors
}

fn entry_for(donor: &Donor, rank: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        id: donor.id,
        name: donor.name.clone(),
        username: donor.username.clone().unwrap_or_default(),
        amount: donor.total_usd,
        rank,
        photo_url: donor.photo_url.clone(),
    }
}

/// Top `limit` donors with dense 1-based ranks
pub fn compute_leaderboard(log: &DonationLog, limit: usize) -> Vec<LeaderboardEntry> {
    sorted_donors(log)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, donor)| entry_for(donor, i as u32 + 1))
        .collect()
}

/// Locate a user in the full ordering; their rank may exceed the page limit
pub fn find_user(log: &DonationLog, user_id: i64) -> Option<LeaderboardEntry> {
    let donors = sorted_donors(log);
    donors
        .iter()
        .position(|donor| donor.id == user_id)
        .map(|i| entry_for(donors[i], i as u32 + 1))
}

/// Aggregate totals straight from the snapshot, plus configured goals
pub fn stats(log: &DonationLog, config: &DonationConfig) -> Stats {
    Stats {
        total_stars: log.total_stars,
        total_usd: log.total_usd,
        total_donors: log.donors.len(),
        goal_stars: config.goal_stars,
        goal_usd: config.goal_usd(),
    }
}

/// Cold-start payload: empty board, zero totals, goals still populated
pub fn empty_response(config: &DonationConfig) -> LeaderboardResponse {
    LeaderboardResponse {
        leaderboard: Vec::new(),
        stats: Stats {
            total_stars: 0,
            total_usd: 0.0,
            total_donors: 0,
            goal_stars: config.goal_stars,
            goal_usd: config.goal_usd(),
        },
        current_user: None,
    }
}

/// Build the full leaderboard payload for one viewer
///
/// `snapshot` is `None` before the first donation ever lands; that serves
/// the empty state rather than an error.
pub fn leaderboard_response(
    snapshot: Option<&DonationLog>,
    viewer_id: Option<i64>,
    config: &DonationConfig,
) -> LeaderboardResponse {
    let Some(log) = snapshot else {
        return empty_response(config);
    };

    LeaderboardResponse {
        leaderboard: compute_leaderboard(log, config.leaderboard_limit),
        stats: stats(log, config),
        current_user: viewer_id.and_then(|id| find_user(log, id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn donor(id: i64, stars: u64) -> Donor {
        Donor {
            id,
            name: format!("Donor {id}"),
            username: Some(format!("donor{id}")),
            total_stars: stars,
            total_usd: stars as f64 / 50.0,
            donation_count: 1,
            first_donation: "2025-06-01T10:00:00".to_string(),
            last_donation: "2025-06-01T10:00:00".to_string(),
            photo_url: None,
        }
    }

    fn log_with(donors: &[Donor]) -> DonationLog {
        let mut log = DonationLog::default();
        for d in donors {
            log.total_stars += d.total_stars;
            log.total_usd += d.total_usd;
            log.donors.insert(d.id.to_string(), d.clone());
        }
        log
    }

    #[test]
    fn test_ranks_descending_with_stable_ties() {
        // A=500, B=1500, C=1500: B and C tie and keep snapshot order
        let log = log_with(&[donor(1, 500), donor(2, 1500), donor(3, 1500)]);

        let top_two = compute_leaderboard(&log, 2);
        assert_eq!(top_two.len(), 2);
        assert_eq!((top_two[0].id, top_two[0].rank), (2, 1));
        assert_eq!((top_two[1].id, top_two[1].rank), (3, 2));

        // A is off the page but still ranked against the full board
        let a = find_user(&log, 1).unwrap();
        assert_eq!(a.rank, 3);
    }

    #[test]
    fn test_find_user_absent() {
        let log = log_with(&[donor(1, 500)]);
        assert!(find_user(&log, 999).is_none());
    }

    #[test]
    fn test_limit_truncates_not_pads() {
        let log = log_with(&[donor(1, 10), donor(2, 20), donor(3, 30)]);
        assert_eq!(compute_leaderboard(&log, 100).len(), 3);
        assert_eq!(compute_leaderboard(&log, 0).len(), 0);
    }

    #[test]
    fn test_empty_snapshot_serves_goals() {
        let config = DonationConfig::default();
        let response = leaderboard_response(None, Some(42), &config);
        assert!(response.leaderboard.is_empty());
        assert!(response.current_user.is_none());
        assert_eq!(response.stats.total_donors, 0);
        assert_eq!(response.stats.goal_stars, 50_000);
        assert_eq!(response.stats.goal_usd, 1000.0);
    }

    #[test]
    fn test_stats_come_from_snapshot_totals() {
        // Stored totals are authoritative, not recomputed from donor rows
        let mut log = log_with(&[donor(1, 100)]);
        log.total_stars = 250;
        log.total_usd = 5.0;

        let config = DonationConfig::default();
        let s = stats(&log, &config);
        assert_eq!(s.total_stars, 250);
        assert_eq!(s.total_usd, 5.0);
        assert_eq!(s.total_donors, 1);
    }

    #[test]
    fn test_response_wire_casing() {
        let mut top = donor(2, 1500);
        top.photo_url = Some("https://t.me/i/userpic/320/donor2.jpg".to_string());
        let log = log_with(&[donor(1, 500), top]);

        let config = DonationConfig::default();
        let response = leaderboard_response(Some(&log), Some(1), &config);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["leaderboard"][0]["rank"], 1);
        assert_eq!(
            json["leaderboard"][0]["photoUrl"],
            "https://t.me/i/userpic/320/donor2.jpg"
        );
        // photoUrl is omitted entirely when absent
        assert!(json["leaderboard"][1].get("photoUrl").is_none());
        assert_eq!(json["currentUser"]["id"], 1);
        assert_eq!(json["stats"]["total_stars"], 2000);
        assert_eq!(json["stats"]["goal_usd"], 1000.0);
    }

    #[test]
    fn test_current_user_null_on_the_wire() {
        let log = log_with(&[donor(1, 500)]);
        let config = DonationConfig::default();
        let response = leaderboard_response(Some(&log), None, &config);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["currentUser"].is_null());
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        // Shape written by the bot, including fields the board ignores
        let raw = r#"{
            "donors": {
                "7216130841": {
                    "id": 7216130841,
                    "name": "Ada",
                    "username": "ada",
                    "total_stars": 250,
                    "total_usd": 5.0,
                    "donation_count": 2,
                    "first_donation": "2025-06-01T10:00:00",
                    "last_donation": "2025-06-03T18:30:00",
                    "photo_url": "https://t.me/i/userpic/320/ada.jpg"
                },
                "99": {
                    "id": 99,
                    "name": "Anonymous",
                    "username": null,
                    "total_stars": 75,
                    "total_usd": 1.5,
                    "donation_count": 1,
                    "first_donation": "2025-06-02T09:00:00",
                    "last_donation": "2025-06-02T09:00:00"
                }
            },
            "total_stars": 325,
            "total_usd": 6.5,
            "transactions": [
                {
                    "user_id": 7216130841,
                    "stars": 100,
                    "usd": 2.0,
                    "charge_id": "ch_0001",
                    "timestamp": "2025-06-03T18:30:00"
                }
            ],
            "last_milestone": 0
        }"#;

        let log: DonationLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.donors.len(), 2);
        assert_eq!(log.total_stars, 325);
        assert_eq!(log.transactions.len(), 1);
        assert_eq!(log.last_milestone, Some(0));

        let board = compute_leaderboard(&log, 100);
        assert_eq!(board[0].name, "Ada");
        assert_eq!(board[1].username, "");

        // Survives a rewrite without losing donor data
        let rewritten: DonationLog =
            serde_json::from_str(&serde_json::to_string(&log).unwrap()).unwrap();
        assert_eq!(rewritten.donors.len(), 2);
        assert_eq!(rewritten.donors["99"].username, None);
    }

    proptest! {
        #[test]
        fn prop_ranks_are_exactly_one_to_n(
            stars in prop::collection::btree_map(1i64..5_000, 0u64..1_000_000, 0..50usize),
            limit in 0usize..60,
        ) {
            let donors: Vec<Donor> = stars.iter().map(|(&id, &s)| donor(id, s)).collect();
            let log = log_with(&donors);

            let board = compute_leaderboard(&log, limit);
            prop_assert_eq!(board.len(), limit.min(donors.len()));
            for (i, entry) in board.iter().enumerate() {
                prop_assert_eq!(entry.rank, i as u32 + 1);
            }
            for pair in board.windows(2) {
                let a = log.donors[&pair[0].id.to_string()].total_stars;
                let b = log.donors[&pair[1].id.to_string()].total_stars;
                prop_assert!(a >= b);
            }
        }

        #[test]
        fn prop_find_user_agrees_with_full_board(
            stars in prop::collection::btree_map(1i64..5_000, 0u64..1_000_000, 1..50usize),
        ) {
            let donors: Vec<Donor> = stars.iter().map(|(&id, &s)| donor(id, s)).collect();
            let log = log_with(&donors);

            // Every donor appears exactly once in the full board, at the
            // rank find_user reports
            let full = compute_leaderboard(&log, donors.len());
            for d in &donors {
                let found = find_user(&log, d.id).unwrap();
                let row = &full[(found.rank - 1) as usize];
                prop_assert_eq!(row.id, d.id);
                prop_assert_eq!(row.rank, found.rank);
            }

            // And an id outside the snapshot never ranks
            prop_assert!(find_user(&log, 6_000).is_none());
        }
    }
}
