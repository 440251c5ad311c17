//! Progression systems
//!
//! Leveling, cleanup rewards, reputation, achievements and challenges.

pub mod xp;
pub mod rewards;
pub mod achievements;
pub mod challenges;

pub use xp::{
    LevelUp, XpProgress, XP_BASE, XP_MULTIPLIER,
    apply_xp, cumulative_xp_for_level, level_from_xp, level_title,
    progress_to_next_level, xp_required_for_level,
};
pub use rewards::{CleanupReward, DirtSeverity, ProgressionError, SEVERITY_XP, reputation_score, reward_for_cleanup};
pub use achievements::{Achievement, AchievementDef, Milestone, all_achievements, check_achievements};
pub use challenges::{Challenge, ChallengeError, ChallengeKind};
