//! Cumulative totals over the ledger
//!
//! Totals are always a pure sum over a user's history; nothing here
//! caches or mutates state.

use recircle_common::{compute_reward, ResultRecord, Reward};

#[derive(Debug, Clone, PartialEq)]
pub struct UserTotals {
    pub user_id: String,
    pub records: usize,
    pub points: u64,
    pub co2_saved_kg: f64,
    pub reward: Reward,
}

pub fn totals_for(user_id: &str, records: &[ResultRecord]) -> UserTotals {
    let points = records.iter().map(|r| r.points).sum();
    let co2_saved_kg: f64 = records.iter().map(|r| r.co2_saved_kg).sum();
    UserTotals {
        user_id: user_id.to_string(),
        records: records.len(),
        points,
        co2_saved_kg,
        reward: compute_reward(co2_saved_kg),
    }
}

/// Rank by points, highest first; names break ties for a stable listing.
pub fn leaderboard(mut totals: Vec<UserTotals>) -> Vec<UserTotals> {
    totals.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    totals
}
