//! Daily and weekly challenges
//!
//! Time-boxed goals paying a fixed XP and coin bonus once complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Daily,
    Weekly,
}

/// Reasons a challenge reward cannot be claimed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("challenge {id} is not complete ({progress}/{target})")]
    Incomplete { id: String, progress: u32, target: u32 },
    #[error("challenge {0} has expired")]
    Expired(String),
    #[error("challenge {0} was already claimed")]
    AlreadyClaimed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub coin_reward: u64,
    pub target: u32,
    pub progress: u32,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    /// Advance progress, capped at the target
    ///
    /// Returns true only on the call that completes the challenge.
    pub fn record_progress(&mut self, amount: u32) -> bool {
        let was_complete = self.is_complete();
        self.progress = self.progress.saturating_add(amount).min(self.target);
        !was_complete && self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn percentage(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (f64::from(self.progress) / f64::from(self.target) * 100.0).min(100.0)
    }

    /// Check whether the reward may be paid out at `now`
    pub fn ensure_claimable(&self, now: DateTime<Utc>) -> Result<(), ChallengeError> {
        if self.is_expired(now) {
            return Err(ChallengeError::Expired(self.id.clone()));
        }
        if !self.is_complete() {
            return Err(ChallengeError::Incomplete {
                id: self.id.clone(),
                progress: self.progress,
                target: self.target,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn challenge(target: u32) -> Challenge {
        Challenge {
            id: "daily_3".to_string(),
            title: "Triple Sweep".to_string(),
            description: "Complete 3 cleanups today".to_string(),
            xp_reward: 150,
            coin_reward: 30,
            target,
            progress: 0,
            kind: ChallengeKind::Daily,
            expires_at: Utc::now() + Duration::hours(12),
        }
    }

    #[test]
    fn test_progress_caps_at_target() {
        let mut c = challenge(3);
        assert!(!c.record_progress(1));
        assert_eq!(c.percentage().round(), 33.0);
        assert!(c.record_progress(5));
        assert_eq!(c.progress, 3);
        assert!(!c.record_progress(1));
        assert_eq!(c.percentage(), 100.0);
    }

    #[test]
    fn test_claimable() {
        let mut c = challenge(2);
        let now = Utc::now();
        assert!(matches!(c.ensure_claimable(now), Err(ChallengeError::Incomplete { .. })));
        c.record_progress(2);
        assert!(c.ensure_claimable(now).is_ok());
        assert_eq!(
            c.ensure_claimable(now + Duration::days(1)),
            Err(ChallengeError::Expired("daily_3".to_string()))
        );
    }

    #[test]
    fn test_kind_wire_name() {
        let json = serde_json::to_value(challenge(1)).unwrap();
        assert_eq!(json["type"], "daily");
    }
}
