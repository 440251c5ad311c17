//! SweepX - Gamified litter cleanup
//!
//! Report dirty places, clean up other people's bounties, and climb
//! the ranks. This crate holds the progression engine and the account
//! and bounty rules built on top of it.

pub mod progression;
pub mod bounty;
pub mod save;
pub mod data;
pub mod ui;

// Re-export commonly used types
pub use progression::{CleanupReward, DirtSeverity, ProgressionError, XpProgress};
pub use bounty::{Bounty, BountyStatus};
pub use save::{Session, SessionStore, User};
pub use data::Tuning;
