//! External tuning data
//!
//! Economy and account rules loaded from RON, so they can be adjusted
//! without rebuilding.

pub mod loader;

pub use loader::{Tuning, DEFAULT_TUNING_PATH};
