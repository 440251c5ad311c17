//! RON tuning loader
//!
//! Loads economy and account tuning from an external RON file, with
//! fallback to hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default location of the tuning file, relative to the working directory
pub const DEFAULT_TUNING_PATH: &str = "assets/data/tuning.ron";

/// Adjustable economy and account rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Coins granted to a newly registered account
    pub starting_coins: u64,
    /// Shortest password accepted at login/signup
    pub min_password_len: usize,
    /// Smallest stake a bounty may carry
    pub min_bounty_stake: u64,
    /// Largest stake a bounty may carry
    pub max_bounty_stake: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_coins: 50,
            min_password_len: 6,
            min_bounty_stake: 25,
            max_bounty_stake: 500,
        }
    }
}

impl Tuning {
    /// Load from the default path or fall back to defaults
    pub fn new() -> Self {
        Self::load_or_default(Path::new(DEFAULT_TUNING_PATH))
    }

    /// Load tuning from a RON file, falling back to defaults if missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match Self::from_ron(&content) {
                    Ok(tuning) => {
                        log::info!("Tuning loaded from {:?}", path);
                        return tuning;
                    }
                    Err(e) => log::warn!("Failed to parse {:?}: {}", path, e),
                },
                Err(e) => log::warn!("Failed to read {:?}: {}", path, e),
            }
        }
        log::debug!("Using default tuning");
        Self::default()
    }

    /// Parse and sanity-check a RON document
    pub fn from_ron(content: &str) -> Result<Self, String> {
        let tuning: Self = ron::from_str(content).map_err(|e| e.to_string())?;
        if tuning.min_bounty_stake > tuning.max_bounty_stake {
            return Err(format!(
                "min_bounty_stake {} exceeds max_bounty_stake {}",
                tuning.min_bounty_stake, tuning.max_bounty_stake
            ));
        }
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let tuning = Tuning::from_ron(
            "(starting_coins: 75, min_password_len: 8, min_bounty_stake: 10, max_bounty_stake: 1000)",
        )
        .unwrap();
        assert_eq!(tuning.starting_coins, 75);
        assert_eq!(tuning.min_password_len, 8);
        assert_eq!(tuning.max_bounty_stake, 1000);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let tuning = Tuning::from_ron("(starting_coins: 0)").unwrap();
        assert_eq!(tuning.starting_coins, 0);
        assert_eq!(tuning.min_password_len, 6);
        assert_eq!(tuning.min_bounty_stake, 25);
    }

    #[test]
    fn test_inverted_stake_range_rejected() {
        assert!(Tuning::from_ron("(min_bounty_stake: 600, max_bounty_stake: 500)").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("does/not/exist.ron"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TUNING_PATH);
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(Tuning::from_ron(&content).unwrap(), Tuning::default());
    }
}
