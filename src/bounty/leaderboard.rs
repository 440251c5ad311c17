//! Leaderboard ranking

use serde::{Deserialize, Serialize};

use crate::progression::level_from_xp;
use crate::save::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub avatar_url: String,
    pub xp: u64,
    pub level: u32,
    pub cleanups_completed: u32,
}

/// Rank accounts by XP, then cleanups, then name
///
/// Levels are derived from XP rather than taken from the stored record.
pub fn leaderboard(users: &[User]) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&User> = users.iter().collect();
    ranked.sort_by(|a, b| {
        b.xp.cmp(&a.xp)
            .then_with(|| b.cleanups_completed.cmp(&a.cleanups_completed))
            .then_with(|| a.username.cmp(&b.username))
    });

    ranked
        .into_iter()
        .zip(1..)
        .map(|(user, rank)| LeaderboardEntry {
            rank,
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            xp: user.xp,
            level: level_from_xp(user.xp),
            cleanups_completed: user.cleanups_completed,
        })
        .collect()
}
