//! Account storage
//!
//! The user account record and the session that persists it.

pub mod account;
pub mod session;

pub use account::User;
pub use session::{Session, SessionError, SessionStore};
