//! Experience and leveling
//!
//! XP curve, level search, progress-bar values and level titles.
//! Every function here is pure: stats go in, derived values come out.

use serde::{Deserialize, Serialize};

/// XP needed to go from level 1 to level 2
pub const XP_BASE: f64 = 100.0;
/// Growth factor applied to the requirement of each further level
pub const XP_MULTIPLIER: f64 = 1.5;

/// Calculate XP needed to advance into `level` from `level - 1`
///
/// Level 1 is free. From level 2 onward the cost is
/// `floor(100 * 1.5^(level - 2))`, saturating at `u64::MAX`.
pub fn xp_required_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    let exponent = i32::try_from(level - 2).unwrap_or(i32::MAX);
    // `as` saturates for values beyond the u64 range
    (XP_BASE * XP_MULTIPLIER.powi(exponent)).floor() as u64
}

/// Calculate total XP needed from level 1 to reach a given level
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    (2..=level.max(1))
        .map(xp_required_for_level)
        .fold(0u64, |total, xp| total.saturating_add(xp))
}

/// Highest level whose cumulative requirement fits within `total_xp`
pub fn level_from_xp(total_xp: u64) -> u32 {
    let mut level = 1;
    let mut spent: u64 = 0;

    loop {
        let next = xp_required_for_level(level + 1);
        match spent.checked_add(next) {
            Some(needed) if total_xp >= needed => {
                spent = needed;
                level += 1;
            }
            _ => break,
        }
    }

    level
}

/// Progress-bar view of an XP total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpProgress {
    pub current_level: u32,
    /// XP earned since reaching `current_level`
    pub xp_into_level: u64,
    /// Size of the step from `current_level` to the next one
    pub xp_needed_for_next_level: u64,
    /// Always within 0..=100
    pub percentage_to_next_level: f64,
}

/// Compute level and progress toward the next level
pub fn progress_to_next_level(total_xp: u64) -> XpProgress {
    let current_level = level_from_xp(total_xp);
    let xp_into_level = total_xp - cumulative_xp_for_level(current_level);
    let xp_needed_for_next_level = xp_required_for_level(current_level + 1).max(1);

    let percentage = xp_into_level as f64 / xp_needed_for_next_level as f64 * 100.0;

    XpProgress {
        current_level,
        xp_into_level,
        xp_needed_for_next_level,
        percentage_to_next_level: percentage.clamp(0.0, 100.0),
    }
}

/// Outcome of adding XP to a running total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub total_xp: u64,
    pub previous_level: u32,
    pub new_level: u32,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.previous_level
    }

    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Add XP to a total and report any level change
pub fn apply_xp(current_total: u64, gained: u64) -> LevelUp {
    let total_xp = current_total.saturating_add(gained);
    LevelUp {
        total_xp,
        previous_level: level_from_xp(current_total),
        new_level: level_from_xp(total_xp),
    }
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Street Sweeper",
        5..=9 => "Block Guardian",
        10..=19 => "Neighborhood Hero",
        20..=34 => "District Champion",
        35..=49 => "City Defender",
        50..=74 => "Regional Legend",
        _ => "Global Savior",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_required_for_level() {
        assert_eq!(xp_required_for_level(0), 0);
        assert_eq!(xp_required_for_level(1), 0);
        assert_eq!(xp_required_for_level(2), 100); // Need 100 to go from 1 -> 2
        assert_eq!(xp_required_for_level(3), 150);
        assert_eq!(xp_required_for_level(4), 225);
        assert_eq!(xp_required_for_level(5), 337); // floor(337.5)
    }

    #[test]
    fn test_requirement_strictly_increasing() {
        for level in 2..60 {
            let expected = (100.0 * 1.5f64.powi(level as i32 - 2)).floor() as u64;
            assert_eq!(xp_required_for_level(level), expected);
            assert!(xp_required_for_level(level + 1) > xp_required_for_level(level));
        }
    }

    #[test]
    fn test_cumulative_xp() {
        assert_eq!(cumulative_xp_for_level(1), 0);
        assert_eq!(cumulative_xp_for_level(2), 100);
        assert_eq!(cumulative_xp_for_level(3), 250);
        assert_eq!(cumulative_xp_for_level(4), 475);
    }

    #[test]
    fn test_level_from_xp_boundaries() {
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(99), 1);
        assert_eq!(level_from_xp(100), 2);
        assert_eq!(level_from_xp(249), 2);
        assert_eq!(level_from_xp(250), 3);

        for level in 1..50 {
            assert_eq!(level_from_xp(cumulative_xp_for_level(level)), level);
        }
    }

    #[test]
    fn test_level_from_xp_monotonic() {
        let mut last = level_from_xp(0);
        for xp in (0..200_000).step_by(37) {
            let level = level_from_xp(xp);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_level_from_xp_terminates_at_max() {
        let level = level_from_xp(u64::MAX);
        assert!(level > 50);
        // The next step no longer fits in the remaining range
        let spent = cumulative_xp_for_level(level);
        assert!(xp_required_for_level(level + 1) > u64::MAX - spent);
    }

    #[test]
    fn test_progress_at_zero() {
        let progress = progress_to_next_level(0);
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.xp_into_level, 0);
        assert_eq!(progress.xp_needed_for_next_level, 100);
        assert_eq!(progress.percentage_to_next_level, 0.0);
    }

    #[test]
    fn test_progress_midway() {
        let progress = progress_to_next_level(175);
        assert_eq!(progress.current_level, 2);
        assert_eq!(progress.xp_into_level, 75);
        assert_eq!(progress.xp_needed_for_next_level, 150);
        assert_eq!(progress.percentage_to_next_level, 50.0);
    }

    #[test]
    fn test_progress_percentage_in_range() {
        for xp in (0..500_000).step_by(113) {
            let pct = progress_to_next_level(xp).percentage_to_next_level;
            assert!((0.0..=100.0).contains(&pct), "xp {} gave {}", xp, pct);
        }
        let pct = progress_to_next_level(u64::MAX).percentage_to_next_level;
        assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn test_apply_xp_multiple_levels() {
        let result = apply_xp(0, 475);
        assert_eq!(result.previous_level, 1);
        assert_eq!(result.new_level, 4);
        assert_eq!(result.levels_gained(), 3);
        assert!(result.leveled_up());

        let result = apply_xp(100, 10);
        assert!(!result.leveled_up());
        assert_eq!(result.total_xp, 110);
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Street Sweeper");
        assert_eq!(level_title(4), "Street Sweeper");
        assert_eq!(level_title(5), "Block Guardian");
        assert_eq!(level_title(10), "Neighborhood Hero");
        assert_eq!(level_title(20), "District Champion");
        assert_eq!(level_title(35), "City Defender");
        assert_eq!(level_title(50), "Regional Legend");
        assert_eq!(level_title(75), "Global Savior");
        assert_eq!(level_title(500), "Global Savior");
    }
}
