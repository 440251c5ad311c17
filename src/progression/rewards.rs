//! Cleanup rewards and reputation
//!
//! Severity-based XP payouts, stake pass-through and the reputation score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// XP paid per dirt severity, lightest first
pub const SEVERITY_XP: [u64; 5] = [10, 25, 50, 100, 200];

/// Inputs outside the documented domain of the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressionError {
    #[error("dirt severity {0} is outside 1..=5")]
    SeverityOutOfRange(u8),
    #[error("success rate {0} is outside 0.0..=1.0")]
    SuccessRateOutOfRange(f64),
}

/// How dirty a reported location is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DirtSeverity {
    Light = 1,
    Moderate = 2,
    Heavy = 3,
    Severe = 4,
    Extreme = 5,
}

impl DirtSeverity {
    pub const ALL: [DirtSeverity; 5] = [
        DirtSeverity::Light,
        DirtSeverity::Moderate,
        DirtSeverity::Heavy,
        DirtSeverity::Severe,
        DirtSeverity::Extreme,
    ];

    /// Numeric rating (1-5)
    pub fn rating(&self) -> u8 {
        *self as u8
    }

    /// XP paid for cleaning a location of this severity
    pub fn xp_award(&self) -> u64 {
        SEVERITY_XP[usize::from(self.rating() - 1)]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DirtSeverity::Light => "Light",
            DirtSeverity::Moderate => "Moderate",
            DirtSeverity::Heavy => "Heavy",
            DirtSeverity::Severe => "Severe",
            DirtSeverity::Extreme => "Extreme",
        }
    }
}

impl TryFrom<u8> for DirtSeverity {
    type Error = ProgressionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DirtSeverity::Light),
            2 => Ok(DirtSeverity::Moderate),
            3 => Ok(DirtSeverity::Heavy),
            4 => Ok(DirtSeverity::Severe),
            5 => Ok(DirtSeverity::Extreme),
            other => Err(ProgressionError::SeverityOutOfRange(other)),
        }
    }
}

impl From<DirtSeverity> for u8 {
    fn from(severity: DirtSeverity) -> Self {
        severity.rating()
    }
}

/// Payout for a verified cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReward {
    pub xp_award: u64,
    pub coin_award: u64,
}

impl CleanupReward {
    /// Reward for a severity that has already been validated
    pub fn for_severity(severity: DirtSeverity, bounty_stake: u64) -> Self {
        Self {
            xp_award: severity.xp_award(),
            // The full stake goes to the cleaner; no platform fee
            coin_award: bounty_stake,
        }
    }
}

/// Calculate the reward for cleaning a location
pub fn reward_for_cleanup(dirt_severity: u8, bounty_stake: u64) -> Result<CleanupReward, ProgressionError> {
    let severity = DirtSeverity::try_from(dirt_severity)?;
    Ok(CleanupReward::for_severity(severity, bounty_stake))
}

/// Trust score from completed cleanups and success rate
pub fn reputation_score(cleanups_completed: u32, success_rate: f64) -> Result<u32, ProgressionError> {
    if !success_rate.is_finite() || !(0.0..=1.0).contains(&success_rate) {
        return Err(ProgressionError::SuccessRateOutOfRange(success_rate));
    }
    Ok((f64::from(cleanups_completed) * success_rate * 10.0).floor() as u32)
}
