// SPDX-License-Identifier: MIT

//! Duration string parsing for step time limits.
//!
//! Supports formats:
//! - `"30s"` → 30 seconds
//! - `"500ms"` → 500 milliseconds
//! - `"1m"` → 1 minute
//! - `"1.5s"` → 1.5 seconds

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Check for milliseconds first (longer suffix)
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_millis(n));
    }

    // Check for seconds (supports fractional)
    if let Some(secs) = s.strip_suffix('s') {
        let n: f64 = secs
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        if n < 0.0 {
            return Err(format!("negative duration: {s}"));
        }
        // rejects NaN, infinity, and values past the Duration range
        return Duration::try_from_secs_f64(n).map_err(|_| format!("invalid duration: {s}"));
    }

    // Check for minutes
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return n
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration out of range: {s}"));
    }

    Err(format!(
        "invalid duration format: {s} (use 30s, 500ms, or 1m)"
    ))
}

/// Deserialize a required duration string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
