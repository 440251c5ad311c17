//! Bounties
//!
//! Reported dirty locations, their cleanup lifecycle, and the leaderboard
//! of the people cleaning them.

pub mod lifecycle;
pub mod leaderboard;

pub use lifecycle::{Bounty, BountyDraft, BountyError, BountyStatus};
pub use leaderboard::{leaderboard, LeaderboardEntry};
