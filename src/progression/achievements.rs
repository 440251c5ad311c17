//! Achievement catalogue
//!
//! Milestones earned from cleanups, levels, coins and created bounties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::save::User;

/// An achievement as stored on an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "unlockedAt", default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// What an account has to reach to earn a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Cleanups(u32),
    Level(u32),
    Coins(u64),
    BountiesCreated(u32),
}

impl Milestone {
    pub fn is_met(&self, user: &User) -> bool {
        match *self {
            Milestone::Cleanups(n) => user.cleanups_completed >= n,
            Milestone::Level(n) => user.level >= n,
            Milestone::Coins(n) => user.coins >= n,
            Milestone::BountiesCreated(n) => user.bounties_created >= n,
        }
    }
}

/// Achievement definition
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub milestone: Milestone,
}

impl AchievementDef {
    /// Stamp this definition as unlocked at `now`
    pub fn unlock(&self, now: DateTime<Utc>) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            unlocked_at: Some(now),
        }
    }
}

/// Get all achievement definitions
pub fn all_achievements() -> Vec<AchievementDef> {
    vec![
        // Cleanup achievements
        AchievementDef {
            id: "first_cleanup",
            name: "First Sweep",
            description: "Complete your first cleanup",
            icon: "broom",
            milestone: Milestone::Cleanups(1),
        },
        AchievementDef {
            id: "cleanups_10",
            name: "Regular",
            description: "Complete 10 cleanups",
            icon: "recycle",
            milestone: Milestone::Cleanups(10),
        },
        AchievementDef {
            id: "cleanups_50",
            name: "Eco Warrior",
            description: "Complete 50 cleanups",
            icon: "leaf",
            milestone: Milestone::Cleanups(50),
        },
        AchievementDef {
            id: "cleanups_100",
            name: "Centurion",
            description: "Complete 100 cleanups",
            icon: "trophy",
            milestone: Milestone::Cleanups(100),
        },
        // Level achievements
        AchievementDef {
            id: "level_5",
            name: "Rising Star",
            description: "Reach level 5",
            icon: "star",
            milestone: Milestone::Level(5),
        },
        AchievementDef {
            id: "level_10",
            name: "Local Hero",
            description: "Reach level 10",
            icon: "shield",
            milestone: Milestone::Level(10),
        },
        AchievementDef {
            id: "level_20",
            name: "Champion",
            description: "Reach level 20",
            icon: "crown",
            milestone: Milestone::Level(20),
        },
        // Coin achievements
        AchievementDef {
            id: "coins_1000",
            name: "Saver",
            description: "Hold 1,000 coins",
            icon: "coins",
            milestone: Milestone::Coins(1_000),
        },
        AchievementDef {
            id: "coins_10000",
            name: "Tycoon",
            description: "Hold 10,000 coins",
            icon: "gem",
            milestone: Milestone::Coins(10_000),
        },
        // Reporter achievements
        AchievementDef {
            id: "first_bounty",
            name: "Spotter",
            description: "Post your first bounty",
            icon: "map-pin",
            milestone: Milestone::BountiesCreated(1),
        },
        AchievementDef {
            id: "bounties_10",
            name: "Watchdog",
            description: "Post 10 bounties",
            icon: "eye",
            milestone: Milestone::BountiesCreated(10),
        },
    ]
}

/// Unlock every met milestone the account does not hold yet
///
/// Returns the ids unlocked by this call.
pub fn check_achievements(user: &mut User, now: DateTime<Utc>) -> Vec<String> {
    let mut unlocked = Vec::new();

    for def in all_achievements() {
        if user.has_achievement(def.id) || !def.milestone.is_met(user) {
            continue;
        }
        log::info!("Achievement unlocked for {}: {}", user.username, def.id);
        user.achievements.push(def.unlock(now));
        unlocked.push(def.id.to_string());
    }

    unlocked
}
