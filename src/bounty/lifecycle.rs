//! Bounty lifecycle
//!
//! A bounty moves `Open -> Accepted -> Completed -> Verified`. The creator
//! posts it with a coin stake, a cleaner accepts it and submits proof, and
//! the creator's verification releases the reward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Tuning;
use crate::progression::{CleanupReward, DirtSeverity};
use crate::save::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BountyStatus {
    Open,
    Accepted,
    Completed,
    Verified,
}

impl BountyStatus {
    pub fn name(&self) -> &'static str {
        match self {
            BountyStatus::Open => "open",
            BountyStatus::Accepted => "accepted",
            BountyStatus::Completed => "completed",
            BountyStatus::Verified => "verified",
        }
    }
}

impl std::fmt::Display for BountyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounty error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BountyError {
    #[error("location name is empty")]
    MissingLocation,
    #[error("coordinates ({latitude}, {longitude}) are out of range")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    #[error("stake {stake} is outside {min}..={max}")]
    StakeOutOfRange { stake: u64, min: u64, max: u64 },
    #[error("cannot {action} a bounty that is {status}")]
    InvalidTransition { action: &'static str, status: BountyStatus },
    #[error("creators cannot clean their own bounty")]
    OwnBounty,
    #[error("only the assigned cleaner can submit proof")]
    NotCleaner,
    #[error("only the creator can verify a cleanup")]
    NotCreator,
    #[error("proof image is empty")]
    MissingProof,
}

/// What the reporter fills in when posting a bounty
#[derive(Debug, Clone, PartialEq)]
pub struct BountyDraft {
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub dirt_level: DirtSeverity,
    pub bounty_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    pub bounty_id: String,
    pub creator_id: String,
    pub creator_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaner_username: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub dirt_level: DirtSeverity,
    pub bounty_amount: u64,
    pub status: BountyStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Bounty {
    /// Validate a draft and post it on behalf of `creator`
    pub fn create(
        creator: &mut User,
        draft: BountyDraft,
        tuning: &Tuning,
        now: DateTime<Utc>,
    ) -> Result<Self, BountyError> {
        let location_name = draft.location_name.trim();
        if location_name.is_empty() {
            return Err(BountyError::MissingLocation);
        }
        if !(-90.0..=90.0).contains(&draft.latitude) || !(-180.0..=180.0).contains(&draft.longitude) {
            return Err(BountyError::InvalidCoordinates {
                latitude: draft.latitude,
                longitude: draft.longitude,
            });
        }
        let (min, max) = (tuning.min_bounty_stake, tuning.max_bounty_stake);
        if !(min..=max).contains(&draft.bounty_amount) {
            return Err(BountyError::StakeOutOfRange { stake: draft.bounty_amount, min, max });
        }

        creator.record_bounty_created(now);

        let bounty = Self {
            bounty_id: format!("bounty_{}_{}", now.timestamp_millis(), creator.bounties_created),
            creator_id: creator.user_id.clone(),
            creator_username: creator.username.clone(),
            cleaner_id: None,
            cleaner_username: None,
            image_url: draft.image_url,
            proof_image_url: None,
            latitude: draft.latitude,
            longitude: draft.longitude,
            location_name: location_name.to_string(),
            dirt_level: draft.dirt_level,
            bounty_amount: draft.bounty_amount,
            status: BountyStatus::Open,
            created_at: now,
            completed_at: None,
        };
        log::info!("Bounty {} posted at {} by {}", bounty.bounty_id, bounty.location_name, bounty.creator_username);
        Ok(bounty)
    }

    /// Reward the cleaner will receive once verified
    pub fn reward_preview(&self) -> CleanupReward {
        CleanupReward::for_severity(self.dirt_level, self.bounty_amount)
    }

    pub fn is_creator(&self, user: &User) -> bool {
        self.creator_id == user.user_id
    }

    pub fn is_cleaner(&self, user: &User) -> bool {
        self.cleaner_id.as_deref() == Some(user.user_id.as_str())
    }

    /// Claim an open bounty
    pub fn accept(&mut self, cleaner: &User) -> Result<(), BountyError> {
        self.expect_status("accept", BountyStatus::Open)?;
        if self.is_creator(cleaner) {
            return Err(BountyError::OwnBounty);
        }

        self.cleaner_id = Some(cleaner.user_id.clone());
        self.cleaner_username = Some(cleaner.username.clone());
        self.status = BountyStatus::Accepted;
        log::info!("Bounty {} accepted by {}", self.bounty_id, cleaner.username);
        Ok(())
    }

    /// Attach cleanup proof from the assigned cleaner
    pub fn submit_proof(
        &mut self,
        cleaner: &User,
        proof_image_url: &str,
        now: DateTime<Utc>,
    ) -> Result<(), BountyError> {
        self.expect_status("submit proof for", BountyStatus::Accepted)?;
        if !self.is_cleaner(cleaner) {
            return Err(BountyError::NotCleaner);
        }
        if proof_image_url.trim().is_empty() {
            return Err(BountyError::MissingProof);
        }

        self.proof_image_url = Some(proof_image_url.to_string());
        self.completed_at = Some(now);
        self.status = BountyStatus::Completed;
        log::info!("Bounty {} completed by {}", self.bounty_id, cleaner.username);
        Ok(())
    }

    /// Creator confirms the cleanup; returns the cleaner's payout
    pub fn verify(&mut self, verifier: &User) -> Result<CleanupReward, BountyError> {
        self.expect_status("verify", BountyStatus::Completed)?;
        if !self.is_creator(verifier) {
            return Err(BountyError::NotCreator);
        }

        self.status = BountyStatus::Verified;
        let reward = self.reward_preview();
        log::info!(
            "Bounty {} verified: +{} XP, +{} coins",
            self.bounty_id, reward.xp_award, reward.coin_award
        );
        Ok(reward)
    }

    fn expect_status(&self, action: &'static str, expected: BountyStatus) -> Result<(), BountyError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(BountyError::InvalidTransition { action, status: self.status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(stake: u64) -> BountyDraft {
        BountyDraft {
            image_url: "https://img.example/park.jpg".to_string(),
            latitude: 52.37,
            longitude: 4.89,
            location_name: "Vondelpark entrance".to_string(),
            dirt_level: DirtSeverity::Severe,
            bounty_amount: stake,
        }
    }

    fn users() -> (User, User) {
        let now = Utc::now();
        let mut creator = User::new("ria@example.com", "ria", 500, now);
        creator.user_id = "user_creator".to_string();
        let mut cleaner = User::new("max@example.com", "max", 50, now);
        cleaner.user_id = "user_cleaner".to_string();
        (creator, cleaner)
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut creator, mut cleaner) = users();
        let now = Utc::now();
        let mut bounty = Bounty::create(&mut creator, draft(150), &Tuning::default(), now).unwrap();
        assert_eq!(bounty.status, BountyStatus::Open);
        assert_eq!(creator.bounties_created, 1);
        assert!(creator.has_achievement("first_bounty"));
        // Stake is not taken from the creator
        assert_eq!(creator.coins, 500);

        bounty.accept(&cleaner).unwrap();
        assert_eq!(bounty.cleaner_username.as_deref(), Some("max"));

        bounty.submit_proof(&cleaner, "https://img.example/clean.jpg", now).unwrap();
        assert_eq!(bounty.status, BountyStatus::Completed);
        assert_eq!(bounty.completed_at, Some(now));

        let reward = bounty.verify(&creator).unwrap();
        assert_eq!(reward, CleanupReward { xp_award: 100, coin_award: 150 });
        assert_eq!(bounty.status, BountyStatus::Verified);

        cleaner.apply_cleanup_reward(reward, now);
        assert_eq!(cleaner.coins, 200);
        assert_eq!(cleaner.level, 2);
    }

    #[test]
    fn test_draft_validation() {
        let (mut creator, _) = users();
        let tuning = Tuning::default();
        let now = Utc::now();

        assert_eq!(
            Bounty::create(&mut creator, draft(10), &tuning, now),
            Err(BountyError::StakeOutOfRange { stake: 10, min: 25, max: 500 })
        );
        assert!(Bounty::create(&mut creator, draft(501), &tuning, now).is_err());

        let mut blank = draft(100);
        blank.location_name = "  ".to_string();
        assert_eq!(Bounty::create(&mut creator, blank, &tuning, now), Err(BountyError::MissingLocation));

        let mut off_map = draft(100);
        off_map.latitude = 91.0;
        assert!(matches!(
            Bounty::create(&mut creator, off_map, &tuning, now),
            Err(BountyError::InvalidCoordinates { .. })
        ));

        assert_eq!(creator.bounties_created, 0);
    }

    #[test]
    fn test_out_of_order_transitions() {
        let (mut creator, cleaner) = users();
        let now = Utc::now();
        let mut bounty = Bounty::create(&mut creator, draft(100), &Tuning::default(), now).unwrap();

        assert_eq!(
            bounty.verify(&creator),
            Err(BountyError::InvalidTransition { action: "verify", status: BountyStatus::Open })
        );
        assert!(bounty.submit_proof(&cleaner, "proof.jpg", now).is_err());
        assert_eq!(bounty.accept(&creator), Err(BountyError::OwnBounty));

        bounty.accept(&cleaner).unwrap();
        assert!(bounty.accept(&cleaner).is_err());
        assert_eq!(bounty.submit_proof(&creator, "proof.jpg", now), Err(BountyError::NotCleaner));
        assert_eq!(bounty.submit_proof(&cleaner, "", now), Err(BountyError::MissingProof));

        bounty.submit_proof(&cleaner, "proof.jpg", now).unwrap();
        assert_eq!(bounty.verify(&cleaner), Err(BountyError::NotCreator));
        assert_eq!(bounty.status, BountyStatus::Completed);
    }

    #[test]
    fn test_wire_format() {
        let (mut creator, _) = users();
        let bounty = Bounty::create(&mut creator, draft(100), &Tuning::default(), Utc::now()).unwrap();
        let json = serde_json::to_value(&bounty).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["dirt_level"], 4);
        assert!(json.get("cleaner_id").is_none());
    }
}
