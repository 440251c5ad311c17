//! Display formatting helpers
//!
//! Compact numbers and "time ago" labels for stat bars, reward previews
//! and feeds.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::progression::DirtSeverity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;

/// Shorten large numbers: 1500 -> "1.5K", 2500000 -> "2.5M"
///
/// One decimal place, rounded from the float quotient. A quotient that
/// sits exactly on a .x5 tie rounds up.
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        with_unit(n, 1_000_000, 'M')
    } else if n >= 1_000 {
        with_unit(n, 1_000, 'K')
    } else {
        n.to_string()
    }
}

fn with_unit(n: u64, unit: u64, suffix: char) -> String {
    let value = n as f64 / unit as f64;
    // Only odd multiples of 0.25 are exact ties at one decimal place
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (value * 10.0).ceil();
        format!("{:.1}{}", tenths / 10.0, suffix)
    } else {
        format!("{:.1}{}", value, suffix)
    }
}

/// Parse an ISO-8601 timestamp; offset-less times are taken as UTC
pub fn parse_timestamp(iso: &str) -> Result<DateTime<Utc>, FormatError> {
    let iso = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| FormatError::InvalidTimestamp(iso.to_string()))
}

/// Label how long ago `iso` was, measured against the current time
pub fn relative_time_label(iso: &str) -> Result<String, FormatError> {
    relative_time_label_at(iso, Utc::now())
}

/// Label how long before `now` the timestamp `iso` was
///
/// Timestamps in the future read as "just now".
pub fn relative_time_label_at(iso: &str, now: DateTime<Utc>) -> Result<String, FormatError> {
    let then = parse_timestamp(iso)?;
    Ok(elapsed_label((now - then).num_seconds()))
}

/// Bucket an elapsed number of seconds
pub fn elapsed_label(seconds: i64) -> String {
    match seconds {
        s if s < MINUTE => "just now".to_string(),
        s if s < HOUR => format!("{}m ago", s / MINUTE),
        s if s < DAY => format!("{}h ago", s / HOUR),
        s if s < WEEK => format!("{}d ago", s / DAY),
        s => format!("{}w ago", s / WEEK),
    }
}

/// Human name of a dirt severity rating
pub fn dirt_label(severity: DirtSeverity) -> &'static str {
    severity.name()
}

/// Text progress bar, e.g. `[#####.....]`
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled.min(width)))
}
