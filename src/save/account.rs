//! User account record
//!
//! The persisted account and the stat changes it goes through.
//! Derived values (level, reputation) are always recomputed through
//! the progression engine, never edited directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progression::{
    self, check_achievements, Achievement, Challenge, ChallengeError, CleanupReward, LevelUp,
    ProgressionError, XpProgress,
};

/// Persistent user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
    pub xp: u64,
    pub level: u32,
    pub reputation: u32,
    pub achievements: Vec<Achievement>,
    pub cleanups_completed: u32,
    pub bounties_created: u32,
    pub coins: u64,
    /// Ids of challenges whose reward was already paid
    #[serde(default)]
    pub claimed_challenges: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh level 1 account
    pub fn new(email: &str, username: &str, starting_coins: u64, now: DateTime<Utc>) -> Self {
        Self {
            user_id: format!("user_{}", now.timestamp_millis()),
            email: email.to_string(),
            username: username.to_string(),
            avatar_url: String::new(),
            xp: 0,
            level: 1,
            reputation: 0,
            achievements: Vec::new(),
            cleanups_completed: 0,
            bounties_created: 0,
            coins: starting_coins,
            claimed_challenges: Vec::new(),
            created_at: now,
        }
    }

    /// Progress-bar values for this account
    pub fn progress(&self) -> XpProgress {
        progression::progress_to_next_level(self.xp)
    }

    pub fn title(&self) -> &'static str {
        progression::level_title(self.level)
    }

    /// Reset a stored level that no longer matches the XP total
    ///
    /// Returns true if the level had to change.
    pub fn sync_level(&mut self) -> bool {
        let level = progression::level_from_xp(self.xp);
        if level == self.level {
            return false;
        }
        log::warn!("{} had level {} for {} XP, corrected to {}", self.username, self.level, self.xp, level);
        self.level = level;
        true
    }

    /// Check if an achievement is unlocked
    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == achievement_id)
    }

    /// Add XP and keep the stored level in step with it
    pub fn gain_xp(&mut self, amount: u64) -> LevelUp {
        let result = progression::apply_xp(self.xp, amount);
        self.xp = result.total_xp;
        self.level = result.new_level;
        if result.leveled_up() {
            log::info!("{} reached level {} ({})", self.username, self.level, self.title());
        }
        result
    }

    /// Credit a verified cleanup
    pub fn apply_cleanup_reward(&mut self, reward: CleanupReward, now: DateTime<Utc>) -> LevelUp {
        self.coins = self.coins.saturating_add(reward.coin_award);
        self.cleanups_completed = self.cleanups_completed.saturating_add(1);
        let result = self.gain_xp(reward.xp_award);
        check_achievements(self, now);
        result
    }

    /// Record that this account posted a bounty
    pub fn record_bounty_created(&mut self, now: DateTime<Utc>) {
        self.bounties_created = self.bounties_created.saturating_add(1);
        check_achievements(self, now);
    }

    /// Recompute reputation from the cleanup count
    pub fn refresh_reputation(&mut self, success_rate: f64) -> Result<u32, ProgressionError> {
        self.reputation = progression::reputation_score(self.cleanups_completed, success_rate)?;
        Ok(self.reputation)
    }

    /// Pay out a completed challenge once
    pub fn claim_challenge(
        &mut self,
        challenge: &Challenge,
        now: DateTime<Utc>,
    ) -> Result<LevelUp, ChallengeError> {
        if self.claimed_challenges.contains(&challenge.id) {
            return Err(ChallengeError::AlreadyClaimed(challenge.id.clone()));
        }
        challenge.ensure_claimable(now)?;

        self.claimed_challenges.push(challenge.id.clone());
        self.coins = self.coins.saturating_add(challenge.coin_reward);
        let result = self.gain_xp(challenge.xp_reward);
        check_achievements(self, now);
        Ok(result)
    }
}
